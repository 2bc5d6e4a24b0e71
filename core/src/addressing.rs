use crate::{ExitException, Memory};

/// Offset of the `UINT32` cell holding the frame-local base pointer used by
/// relative operands.
pub const BASE_POINTER_OFFSET: u32 = 0;

/// Maximum number of memory operands a mode can describe.
pub const MAX_OPERANDS: usize = 8;

/// Per-operand addressing flags. Operand `i` is indirect when bit `2i` is set
/// and relative when bit `2i + 1` is set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AddressingMode(pub u16);

impl AddressingMode {
	pub const DIRECT: AddressingMode = AddressingMode(0);

	pub fn new(bits: u16) -> Self {
		Self(bits)
	}

	pub fn is_indirect(&self, operand: usize) -> bool {
		operand < MAX_OPERANDS && (self.0 >> (2 * operand)) & 1 == 1
	}

	pub fn is_relative(&self, operand: usize) -> bool {
		operand < MAX_OPERANDS && (self.0 >> (2 * operand + 1)) & 1 == 1
	}

	/// Set the indirect flag of `operand`.
	pub fn with_indirect(self, operand: usize) -> Self {
		Self(self.0 | (1 << (2 * operand)))
	}

	pub fn with_relative(self, operand: usize) -> Self {
		Self(self.0 | (1 << (2 * operand + 1)))
	}

	/// Number of indirect operands among the first `count`.
	pub fn indirect_count(&self, count: usize) -> usize {
		(0..count).filter(|i| self.is_indirect(*i)).count()
	}

	pub fn relative_count(&self, count: usize) -> usize {
		(0..count).filter(|i| self.is_relative(*i)).count()
	}

	/// Resolve raw operand words into concrete memory offsets, positionally.
	///
	/// An indirect operand names a `UINT32` cell whose value is the real
	/// offset (one level only). A relative operand then has the base pointer
	/// added to it.
	pub fn resolve(&self, operands: &[u32], memory: &Memory) -> Result<Resolved, ExitException> {
		let mut resolved = Resolved::default();
		for (i, operand) in operands.iter().enumerate().take(MAX_OPERANDS) {
			let mut offset = *operand;
			if self.is_indirect(i) {
				offset = memory.get_u32(offset)?;
			}
			if self.is_relative(i) {
				let base = memory.get_u32(BASE_POINTER_OFFSET)?;
				offset = offset
					.checked_add(base)
					.ok_or(ExitException::AddressOutOfRange)?;
			}
			resolved.push(offset);
		}
		Ok(resolved)
	}
}

/// Resolved memory offsets of one instruction, in operand order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Resolved {
	offsets: [u32; MAX_OPERANDS],
	len: usize,
}

impl Resolved {
	fn push(&mut self, offset: u32) {
		self.offsets[self.len] = offset;
		self.len += 1;
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn as_slice(&self) -> &[u32] {
		&self.offsets[..self.len]
	}
}

impl core::ops::Index<usize> for Resolved {
	type Output = u32;

	fn index(&self, index: usize) -> &u32 {
		&self.as_slice()[index]
	}
}
