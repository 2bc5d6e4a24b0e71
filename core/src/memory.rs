use crate::{ExitException, MemoryValue, Tag};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {
		$x.emit();
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

/// Tagged memory of one frame. Addressed by 32-bit offsets; cells that were
/// never written read as `FIELD` zero. Sparse, so any offset is usable
/// without allocating the range below it.
#[derive(Clone, Debug, Default)]
pub struct Memory {
	cells: BTreeMap<u32, MemoryValue>,
}

impl Memory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of cells that have been written.
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	/// Read a copy of the cell at `offset`.
	pub fn get(&self, offset: u32) -> MemoryValue {
		let value = self.cells.get(&offset).copied().unwrap_or_default();
		event!(crate::tracing::Event::MemoryRead { offset, value });
		value
	}

	pub fn set(&mut self, offset: u32, value: MemoryValue) {
		event!(crate::tracing::Event::MemoryWrite { offset, value });
		self.cells.insert(offset, value);
	}

	/// Read `len` consecutive cells starting at `offset`.
	pub fn get_slice(&self, offset: u32, len: u32) -> Result<Vec<MemoryValue>, ExitException> {
		check_range(offset, len)?;
		Ok((0..len).map(|i| self.get(offset + i)).collect())
	}

	/// Write `values` to consecutive cells starting at `offset`.
	pub fn set_slice(&mut self, offset: u32, values: &[MemoryValue]) -> Result<(), ExitException> {
		let len = u32::try_from(values.len()).map_err(|_| ExitException::AddressOutOfRange)?;
		check_range(offset, len)?;
		for (i, value) in values.iter().enumerate() {
			self.set(offset + i as u32, *value);
		}
		Ok(())
	}

	/// Read the cell at `offset`, requiring it to carry `expected`.
	pub fn get_tagged(&self, offset: u32, expected: Tag) -> Result<MemoryValue, ExitException> {
		let value = self.get(offset);
		if value.tag() != expected {
			return Err(ExitException::TypeMismatch {
				expected,
				found: value.tag(),
			});
		}
		Ok(value)
	}

	/// Read a `UINT32` cell as an integer.
	pub fn get_u32(&self, offset: u32) -> Result<u32, ExitException> {
		Ok(self.get_tagged(offset, Tag::Uint32)?.to_u128() as u32)
	}

	pub fn check_tag(&self, expected: Tag, offset: u32) -> Result<(), ExitException> {
		self.get_tagged(offset, expected).map(|_| ())
	}

	/// Fail with `TypeMismatch` unless every offset carries `expected`.
	pub fn check_tags(&self, expected: Tag, offsets: &[u32]) -> Result<(), ExitException> {
		for offset in offsets {
			self.check_tag(expected, *offset)?;
		}
		Ok(())
	}

	/// Fail with `TypeMismatch` unless the `len` cells from `offset` all carry
	/// `expected`.
	pub fn check_tags_range(&self, expected: Tag, offset: u32, len: u32) -> Result<(), ExitException> {
		check_range(offset, len)?;
		for i in 0..len {
			self.check_tag(expected, offset + i)?;
		}
		Ok(())
	}
}

fn check_range(offset: u32, len: u32) -> Result<(), ExitException> {
	if len > 0 && offset.checked_add(len - 1).is_none() {
		return Err(ExitException::AddressOutOfRange);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FieldElement;

	#[test]
	fn unwritten_cells_read_as_field_zero() {
		let memory = Memory::new();
		assert_eq!(memory.get(0), MemoryValue::Field(FieldElement::zero()));
		assert_eq!(memory.get(u32::MAX), MemoryValue::Field(FieldElement::zero()));
		assert!(memory.is_empty());
	}

	#[test]
	fn slices() {
		let mut memory = Memory::new();
		memory
			.set_slice(10, &[MemoryValue::U8(1), MemoryValue::U16(2), MemoryValue::U32(3)])
			.unwrap();
		assert_eq!(
			memory.get_slice(9, 5).unwrap(),
			vec![
				MemoryValue::default(),
				MemoryValue::U8(1),
				MemoryValue::U16(2),
				MemoryValue::U32(3),
				MemoryValue::default(),
			]
		);
		assert_eq!(memory.get_slice(u32::MAX, 1).unwrap().len(), 1);
		assert_eq!(memory.get_slice(u32::MAX, 2), Err(ExitException::AddressOutOfRange));
		assert_eq!(memory.get_slice(u32::MAX, 0), Ok(Vec::new()));
	}

	#[test]
	fn tag_checks() {
		let mut memory = Memory::new();
		memory.set(0, MemoryValue::U32(5));
		memory.set(1, MemoryValue::U32(6));
		memory.set(2, MemoryValue::U64(7));
		assert_eq!(memory.check_tags(Tag::Uint32, &[0, 1]), Ok(()));
		assert_eq!(
			memory.check_tags(Tag::Uint32, &[0, 2]),
			Err(ExitException::TypeMismatch {
				expected: Tag::Uint32,
				found: Tag::Uint64
			})
		);
		assert_eq!(memory.get_u32(1), Ok(6));
		assert!(memory.get_u32(3).is_err());
		assert!(memory.check_tags_range(Tag::Uint32, 0, 3).is_err());
	}

	#[test]
	fn reads_are_copies() {
		let mut memory = Memory::new();
		memory.set(4, MemoryValue::U8(1));
		let read = memory.get(4);
		memory.set(4, MemoryValue::U8(2));
		assert_eq!(read, MemoryValue::U8(1));
		assert_eq!(memory.len(), 1);
	}
}
