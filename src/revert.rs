use crate::{ExitError, FieldElement, Instruction};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// Why a frame reverted, with enough context to explain it to a user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevertReason {
	pub error: ExitError,
	/// Contract the frame was executing.
	pub address: FieldElement,
	/// Call depth of the frame.
	pub depth: usize,
	/// Program counter of the failing instruction, if one was running.
	pub pc: Option<usize>,
	/// The failing instruction, if one was running.
	pub instruction: Option<Instruction>,
	/// Output of an explicit revert.
	pub data: Vec<FieldElement>,
	/// Reason of the failed nested call that preceded this revert.
	pub nested: Option<Box<RevertReason>>,
}

impl RevertReason {
	pub fn new(error: ExitError, address: FieldElement, depth: usize) -> Self {
		Self {
			error,
			address,
			depth,
			pc: None,
			instruction: None,
			data: Vec::new(),
			nested: None,
		}
	}

	pub fn at(mut self, pc: usize, instruction: &Instruction) -> Self {
		self.pc = Some(pc);
		self.instruction = Some(instruction.clone());
		self
	}

	/// The innermost reason of the trail.
	pub fn root_cause(&self) -> &RevertReason {
		match &self.nested {
			Some(nested) => nested.root_cause(),
			None => self,
		}
	}
}

impl fmt::Display for RevertReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.error)?;
		if !self.data.is_empty() {
			write!(f, " [")?;
			for (i, value) in self.data.iter().enumerate() {
				if i > 0 {
					write!(f, ", ")?;
				}
				write!(f, "{}", value)?;
			}
			write!(f, "]")?;
		}
		write!(f, " in contract {} at depth {}", self.address, self.depth)?;
		if let (Some(pc), Some(instruction)) = (self.pc, &self.instruction) {
			write!(f, ", pc {} ({})", pc, instruction)?;
		}
		if let Some(nested) = &self.nested {
			write!(f, "\n  after failed call: {}", nested)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ExitException, Opcode, Operand};

	#[test]
	fn trail_through_nested_frames() {
		let jump = Instruction::new(Opcode::Jump32, vec![Operand::U32(99)]).unwrap();
		let inner = RevertReason::new(
			ExitException::InvalidJump(99).into(),
			FieldElement::from(2u64),
			1,
		)
		.at(4, &jump);
		let mut outer = RevertReason::new(ExitError::Reverted, FieldElement::from(1u64), 0);
		outer.data = vec![FieldElement::from(255u64)];
		outer.nested = Some(Box::new(inner.clone()));

		assert_eq!(outer.root_cause(), &inner);
		assert_eq!(
			outer.to_string(),
			"explicit revert [0xff] in contract 0x1 at depth 0\n  \
			 after failed call: invalid jump destination 99 in contract 0x2 at depth 1, pc 4 (JUMP_32 99)"
		);
	}
}
