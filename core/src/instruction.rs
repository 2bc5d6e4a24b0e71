use crate::codec::{encode_instruction, Operand};
use crate::{AddressingMode, DecodeError, Opcode, Tag};
use alloc::vec::Vec;
use core::fmt;

/// A decoded instruction: an opcode with operands that follow its wire
/// format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
	opcode: Opcode,
	operands: Vec<Operand>,
}

impl Instruction {
	/// Build an instruction, checking that the operands match the opcode's
	/// wire format in count and encoding.
	pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Result<Self, DecodeError> {
		let format = opcode.wire_format();
		let matches = format.operands.len() == operands.len()
			&& format
				.operands
				.iter()
				.zip(operands.iter())
				.all(|(expected, operand)| operand.operand_type() == *expected);
		if !matches {
			return Err(DecodeError::OperandMismatch { opcode });
		}
		Ok(Self { opcode, operands })
	}

	/// Decoder-side constructor. Operands were read by following the wire
	/// format, so they match it.
	pub(crate) fn from_parts(opcode: Opcode, operands: Vec<Operand>) -> Self {
		Self { opcode, operands }
	}

	pub fn opcode(&self) -> Opcode {
		self.opcode
	}

	pub fn operands(&self) -> &[Operand] {
		&self.operands
	}

	/// Operand at `index` as an integer. Missing operands read as 0.
	pub fn operand(&self, index: usize) -> u32 {
		self.operands.get(index).map(|o| o.as_u32()).unwrap_or(0)
	}

	pub fn operand_value(&self, index: usize) -> Option<&Operand> {
		self.operands.get(index)
	}

	/// Addressing mode, or direct addressing when the opcode takes none.
	pub fn addressing_mode(&self) -> AddressingMode {
		if self.opcode.wire_format().addressing {
			AddressingMode::new(self.operand(0) as u16)
		} else {
			AddressingMode::DIRECT
		}
	}

	/// Raw words of the memory-offset operands, in addressing order.
	pub fn offset_words(&self) -> Vec<u32> {
		self.opcode
			.wire_format()
			.offsets
			.iter()
			.map(|index| self.operand(*index))
			.collect()
	}

	/// The first tag operand, if the opcode has one.
	pub fn tag(&self) -> Option<Tag> {
		self.operands.iter().find_map(|o| o.as_tag())
	}

	/// The tag operand, `FIELD` for opcodes that carry none.
	pub fn in_tag(&self) -> Tag {
		self.tag().unwrap_or(Tag::Field)
	}

	/// Encoded size in bytes.
	pub fn size(&self) -> usize {
		self.opcode.wire_format().size()
	}

	pub fn encode_into(&self, out: &mut Vec<u8>) {
		encode_instruction(self, out)
	}
}

impl fmt::Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.opcode)?;
		for operand in &self.operands {
			match operand {
				Operand::Tag(tag) => write!(f, " {}", tag)?,
				Operand::Field(value) => write!(f, " 0x{:x}", value)?,
				other => write!(f, " {}", other.as_u32())?,
			}
		}
		Ok(())
	}
}
