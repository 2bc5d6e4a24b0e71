//! Bytecode wire format.
//!
//! A program is the plain concatenation of its instructions: one opcode byte
//! followed by the operands listed in the opcode's [`WireFormat`], each
//! written big-endian at its declared width. There is no header or length
//! prefix.

use crate::{DecodeError, Instruction, Opcode, Tag};
use alloc::vec::Vec;
use primitive_types::U256;

/// Encoding of a single operand field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandType {
	U8,
	U16,
	U32,
	U64,
	U128,
	/// One byte holding a [`Tag`].
	Tag,
	/// Full field-width (32 bytes) constant.
	Field,
}

impl OperandType {
	/// Width on the wire, in bytes.
	pub const fn size(self) -> usize {
		match self {
			OperandType::U8 | OperandType::Tag => 1,
			OperandType::U16 => 2,
			OperandType::U32 => 4,
			OperandType::U64 => 8,
			OperandType::U128 => 16,
			OperandType::Field => 32,
		}
	}
}

/// Ordered operand encodings of one opcode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WireFormat {
	/// Operand fields, in wire order.
	pub operands: &'static [OperandType],
	/// Whether the first operand is the addressing mode.
	pub addressing: bool,
	/// Indices of the operands that are memory offsets, in the order the
	/// addressing mode numbers them.
	pub offsets: &'static [usize],
}

impl WireFormat {
	pub const fn addressed(operands: &'static [OperandType], offsets: &'static [usize]) -> Self {
		Self {
			operands,
			addressing: true,
			offsets,
		}
	}

	pub const fn unaddressed(operands: &'static [OperandType]) -> Self {
		Self {
			operands,
			addressing: false,
			offsets: &[],
		}
	}

	/// Encoded size of an instruction in this format, opcode byte included.
	pub fn size(&self) -> usize {
		1 + self.operands.iter().map(|o| o.size()).sum::<usize>()
	}
}

/// Decoded operand value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operand {
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	U128(u128),
	Tag(Tag),
	Field(U256),
}

impl Operand {
	pub fn operand_type(&self) -> OperandType {
		match self {
			Operand::U8(_) => OperandType::U8,
			Operand::U16(_) => OperandType::U16,
			Operand::U32(_) => OperandType::U32,
			Operand::U64(_) => OperandType::U64,
			Operand::U128(_) => OperandType::U128,
			Operand::Tag(_) => OperandType::Tag,
			Operand::Field(_) => OperandType::Field,
		}
	}

	/// Value as a 256-bit integer. Tags read as their wire byte.
	pub fn as_u256(&self) -> U256 {
		match *self {
			Operand::U8(v) => U256::from(v),
			Operand::U16(v) => U256::from(v),
			Operand::U32(v) => U256::from(v),
			Operand::U64(v) => U256::from(v),
			Operand::U128(v) => U256::from(v),
			Operand::Tag(t) => U256::from(t.as_u8()),
			Operand::Field(v) => v,
		}
	}

	/// Low 32 bits of the value. Offsets and immediates are at most 32 bits
	/// wide, so this is lossless for them.
	pub fn as_u32(&self) -> u32 {
		self.as_u256().low_u32()
	}

	pub fn as_tag(&self) -> Option<Tag> {
		match self {
			Operand::Tag(t) => Some(*t),
			_ => None,
		}
	}

	fn encode(&self, out: &mut Vec<u8>) {
		match *self {
			Operand::U8(v) => out.push(v),
			Operand::U16(v) => out.extend_from_slice(&v.to_be_bytes()),
			Operand::U32(v) => out.extend_from_slice(&v.to_be_bytes()),
			Operand::U64(v) => out.extend_from_slice(&v.to_be_bytes()),
			Operand::U128(v) => out.extend_from_slice(&v.to_be_bytes()),
			Operand::Tag(t) => out.push(t.as_u8()),
			Operand::Field(v) => {
				let mut bytes = [0u8; 32];
				v.to_big_endian(&mut bytes);
				out.extend_from_slice(&bytes);
			}
		}
	}
}

/// The active decoding table: which defined opcodes are accepted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InstructionSet {
	enabled: [bool; Opcode::COUNT],
}

impl InstructionSet {
	/// Every defined opcode.
	pub const fn all() -> Self {
		Self {
			enabled: [true; Opcode::COUNT],
		}
	}

	/// This set with `opcode` removed.
	pub const fn without(mut self, opcode: Opcode) -> Self {
		self.enabled[opcode.as_usize()] = false;
		self
	}

	pub const fn contains(&self, opcode: Opcode) -> bool {
		self.enabled[opcode.as_usize()]
	}
}

impl Default for InstructionSet {
	fn default() -> Self {
		Self::all()
	}
}

/// Decode a whole program. The buffer must hold a whole number of
/// instructions.
pub fn decode(bytes: &[u8], set: &InstructionSet) -> Result<Vec<Instruction>, DecodeError> {
	let mut instructions = Vec::new();
	let mut position = 0;
	while position < bytes.len() {
		let (instruction, next) = decode_instruction(bytes, position, set)?;
		instructions.push(instruction);
		position = next;
	}
	Ok(instructions)
}

/// Decode the instruction starting at `position`, returning it with the
/// position of the next one.
pub fn decode_instruction(
	bytes: &[u8],
	position: usize,
	set: &InstructionSet,
) -> Result<(Instruction, usize), DecodeError> {
	let byte = *bytes
		.get(position)
		.ok_or(DecodeError::ParsingError { position })?;
	let opcode = Opcode::from_u8(byte)
		.filter(|opcode| set.contains(*opcode))
		.ok_or(DecodeError::InvalidOpcode { position, byte })?;

	let format = opcode.wire_format();
	let mut operands = Vec::with_capacity(format.operands.len());
	let mut cursor = position + 1;
	for operand_type in format.operands {
		let end = cursor + operand_type.size();
		let field = bytes
			.get(cursor..end)
			.ok_or(DecodeError::ParsingError { position: cursor })?;
		let operand = match operand_type {
			OperandType::U8 => Operand::U8(field[0]),
			OperandType::U16 => Operand::U16(u16::from_be_bytes(read_array(field))),
			OperandType::U32 => Operand::U32(u32::from_be_bytes(read_array(field))),
			OperandType::U64 => Operand::U64(u64::from_be_bytes(read_array(field))),
			OperandType::U128 => Operand::U128(u128::from_be_bytes(read_array(field))),
			OperandType::Tag => Operand::Tag(Tag::from_u8(field[0]).ok_or(
				DecodeError::InvalidTagValue {
					position: cursor,
					byte: field[0],
				},
			)?),
			OperandType::Field => Operand::Field(U256::from_big_endian(field)),
		};
		operands.push(operand);
		cursor = end;
	}

	Ok((Instruction::from_parts(opcode, operands), cursor))
}

/// Encode a program. Inverse of [`decode`].
pub fn encode(instructions: &[Instruction]) -> Vec<u8> {
	let mut out = Vec::new();
	for instruction in instructions {
		encode_instruction(instruction, &mut out);
	}
	out
}

pub fn encode_instruction(instruction: &Instruction, out: &mut Vec<u8>) {
	out.push(instruction.opcode().as_u8());
	for operand in instruction.operands() {
		operand.encode(out);
	}
}

fn read_array<const N: usize>(field: &[u8]) -> [u8; N] {
	let mut buf = [0u8; N];
	buf.copy_from_slice(&field[..N]);
	buf
}

#[cfg(test)]
mod tests {
	use super::*;

	fn add8(a: u8, b: u8, dst: u8) -> Instruction {
		Instruction::new(
			Opcode::Add8,
			vec![Operand::U8(0), Operand::Tag(Tag::Field), Operand::U8(a), Operand::U8(b), Operand::U8(dst)],
		)
		.unwrap()
	}

	#[test]
	fn decode_add() {
		let bytes = hex::decode("000000010203").unwrap();
		let decoded = decode(&bytes, &InstructionSet::all()).unwrap();
		assert_eq!(decoded, vec![add8(1, 2, 3)]);
		assert_eq!(encode(&decoded), bytes);
	}

	#[test]
	fn multi_byte_operands_are_big_endian() {
		let set = Instruction::new(
			Opcode::Set32,
			vec![
				Operand::U8(0),
				Operand::Tag(Tag::Uint32),
				Operand::U16(0x0102),
				Operand::U32(0x0a0b0c0d),
			],
		)
		.unwrap();
		assert_eq!(hex::encode(encode(&[set])), "27000401020a0b0c0d");
	}

	#[test]
	fn opcode_beyond_range() {
		let err = decode(&[Opcode::MAX + 1], &InstructionSet::all()).unwrap_err();
		assert_eq!(
			err,
			DecodeError::InvalidOpcode {
				position: 0,
				byte: Opcode::MAX + 1
			}
		);
		assert!(matches!(
			decode(&[0xff], &InstructionSet::all()),
			Err(DecodeError::InvalidOpcode { byte: 0xff, .. })
		));
	}

	#[test]
	fn opcode_outside_active_set() {
		let set = InstructionSet::all().without(Opcode::InternalReturn);
		let bytes = [Opcode::InternalReturn.as_u8()];
		assert_eq!(
			decode(&bytes, &set),
			Err(DecodeError::InvalidOpcode {
				position: 0,
				byte: Opcode::InternalReturn.as_u8()
			})
		);
		assert_eq!(decode(&bytes, &InstructionSet::all()).unwrap().len(), 1);
	}

	#[test]
	fn invalid_tag_byte() {
		let bytes = hex::decode("0000070102").unwrap();
		assert_eq!(
			decode(&bytes, &InstructionSet::all()),
			Err(DecodeError::InvalidTagValue { position: 2, byte: 7 })
		);
	}

	#[test]
	fn trailing_partial_instruction() {
		let mut bytes = encode(&[add8(1, 2, 3)]);
		bytes.push(Opcode::Add8.as_u8());
		bytes.push(0);
		assert!(matches!(
			decode(&bytes, &InstructionSet::all()),
			Err(DecodeError::ParsingError { .. })
		));
	}

	#[test]
	fn error_position_points_into_second_instruction() {
		let mut bytes = encode(&[add8(1, 2, 3)]);
		bytes.extend_from_slice(&[Opcode::Jump32.as_u8(), 0, 0]);
		assert_eq!(
			decode(&bytes, &InstructionSet::all()),
			Err(DecodeError::ParsingError { position: 7 })
		);
	}
}
