use crate::codec::{OperandType, WireFormat};
use core::fmt;

/// Opcode enum. One-to-one corresponding to an `u8` value. Several opcodes
/// may share one logical operation with different operand widths.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Opcode {
	Add8 = 0x00,
	Add16 = 0x01,
	Sub8 = 0x02,
	Sub16 = 0x03,
	Mul8 = 0x04,
	Mul16 = 0x05,
	Div8 = 0x06,
	Div16 = 0x07,

	Eq8 = 0x08,
	Eq16 = 0x09,
	Lt8 = 0x0a,
	Lt16 = 0x0b,
	Lte8 = 0x0c,
	Lte16 = 0x0d,

	And8 = 0x0e,
	And16 = 0x0f,
	Or8 = 0x10,
	Or16 = 0x11,
	Xor8 = 0x12,
	Xor16 = 0x13,
	Not8 = 0x14,
	Not16 = 0x15,
	Shl8 = 0x16,
	Shl16 = 0x17,
	Shr8 = 0x18,
	Shr16 = 0x19,

	Cast8 = 0x1a,
	Cast16 = 0x1b,

	GetEnvVar16 = 0x1c,
	CalldataCopy = 0x1d,
	SuccessCopy = 0x1e,
	ReturndataSize = 0x1f,
	ReturndataCopy = 0x20,

	Jump32 = 0x21,
	JumpI32 = 0x22,
	InternalCall = 0x23,
	InternalReturn = 0x24,

	Set8 = 0x25,
	Set16 = 0x26,
	Set32 = 0x27,
	Set64 = 0x28,
	Set128 = 0x29,
	SetFf = 0x2a,
	Mov8 = 0x2b,
	Mov16 = 0x2c,

	SLoad = 0x2d,
	SStore = 0x2e,
	NullifierExists = 0x2f,
	EmitNullifier = 0x30,

	Call = 0x31,
	StaticCall = 0x32,
	Return = 0x33,
	Revert8 = 0x34,
	Revert16 = 0x35,

	Msm = 0x36,
}

use self::Opcode::*;

impl Opcode {
	/// Largest defined opcode byte.
	pub const MAX: u8 = 0x36;
	/// Number of defined opcodes.
	pub const COUNT: usize = Self::MAX as usize + 1;

	/// All opcodes, indexed by their byte value.
	pub const ALL: [Opcode; Self::COUNT] = [
		Add8, Add16, Sub8, Sub16, Mul8, Mul16, Div8, Div16,
		Eq8, Eq16, Lt8, Lt16, Lte8, Lte16,
		And8, And16, Or8, Or16, Xor8, Xor16, Not8, Not16, Shl8, Shl16, Shr8, Shr16,
		Cast8, Cast16,
		GetEnvVar16, CalldataCopy, SuccessCopy, ReturndataSize, ReturndataCopy,
		Jump32, JumpI32, InternalCall, InternalReturn,
		Set8, Set16, Set32, Set64, Set128, SetFf, Mov8, Mov16,
		SLoad, SStore, NullifierExists, EmitNullifier,
		Call, StaticCall, Return, Revert8, Revert16,
		Msm,
	];

	pub const fn from_u8(byte: u8) -> Option<Opcode> {
		if byte > Self::MAX {
			None
		} else {
			Some(Self::ALL[byte as usize])
		}
	}

	pub const fn as_u8(self) -> u8 {
		self as u8
	}

	pub const fn as_usize(self) -> usize {
		self as usize
	}

	pub const fn name(self) -> &'static str {
		match self {
			Add8 => "ADD_8",
			Add16 => "ADD_16",
			Sub8 => "SUB_8",
			Sub16 => "SUB_16",
			Mul8 => "MUL_8",
			Mul16 => "MUL_16",
			Div8 => "DIV_8",
			Div16 => "DIV_16",
			Eq8 => "EQ_8",
			Eq16 => "EQ_16",
			Lt8 => "LT_8",
			Lt16 => "LT_16",
			Lte8 => "LTE_8",
			Lte16 => "LTE_16",
			And8 => "AND_8",
			And16 => "AND_16",
			Or8 => "OR_8",
			Or16 => "OR_16",
			Xor8 => "XOR_8",
			Xor16 => "XOR_16",
			Not8 => "NOT_8",
			Not16 => "NOT_16",
			Shl8 => "SHL_8",
			Shl16 => "SHL_16",
			Shr8 => "SHR_8",
			Shr16 => "SHR_16",
			Cast8 => "CAST_8",
			Cast16 => "CAST_16",
			GetEnvVar16 => "GETENVVAR_16",
			CalldataCopy => "CALLDATACOPY",
			SuccessCopy => "SUCCESSCOPY",
			ReturndataSize => "RETURNDATASIZE",
			ReturndataCopy => "RETURNDATACOPY",
			Jump32 => "JUMP_32",
			JumpI32 => "JUMPI_32",
			InternalCall => "INTERNALCALL",
			InternalReturn => "INTERNALRETURN",
			Set8 => "SET_8",
			Set16 => "SET_16",
			Set32 => "SET_32",
			Set64 => "SET_64",
			Set128 => "SET_128",
			SetFf => "SET_FF",
			Mov8 => "MOV_8",
			Mov16 => "MOV_16",
			SLoad => "SLOAD",
			SStore => "SSTORE",
			NullifierExists => "NULLIFIEREXISTS",
			EmitNullifier => "EMITNULLIFIER",
			Call => "CALL",
			StaticCall => "STATICCALL",
			Return => "RETURN",
			Revert8 => "REVERT_8",
			Revert16 => "REVERT_16",
			Msm => "MSM",
		}
	}

	/// Wire format of the opcode's operands.
	pub const fn wire_format(self) -> &'static WireFormat {
		match self {
			Add8 | Sub8 | Mul8 | Div8 | Eq8 | Lt8 | Lte8 | And8 | Or8 | Xor8 | Shl8 | Shr8 => {
				&BINARY_8
			}
			Add16 | Sub16 | Mul16 | Div16 | Eq16 | Lt16 | Lte16 | And16 | Or16 | Xor16
			| Shl16 | Shr16 => &BINARY_16,
			Not8 | Cast8 => &UNARY_8,
			Not16 | Cast16 => &UNARY_16,
			GetEnvVar16 => &GETENVVAR_16,
			CalldataCopy | ReturndataCopy | NullifierExists => &TRIPLE_16,
			SuccessCopy | ReturndataSize | EmitNullifier => &SINGLE_16,
			Jump32 | InternalCall => &JUMP_32,
			JumpI32 => &JUMPI_32,
			InternalReturn => &NONE,
			Set8 => &SET_8,
			Set16 => &SET_16,
			Set32 => &SET_32,
			Set64 => &SET_64,
			Set128 => &SET_128,
			SetFf => &SET_FF,
			Mov8 | Revert8 => &PAIR_8,
			Mov16 | SLoad | SStore | Return | Revert16 => &PAIR_16,
			Call | StaticCall => &CALL,
			Msm => &MSM,
		}
	}
}

impl fmt::Display for Opcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

use self::OperandType::{Field as FF, Tag as TAG, U128, U16, U32, U64, U8};

const BINARY_8: WireFormat = WireFormat::addressed(&[U8, TAG, U8, U8, U8], &[2, 3, 4]);
const BINARY_16: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U16, U16], &[2, 3, 4]);
const UNARY_8: WireFormat = WireFormat::addressed(&[U8, TAG, U8, U8], &[2, 3]);
const UNARY_16: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U16], &[2, 3]);
const GETENVVAR_16: WireFormat = WireFormat::addressed(&[U8, U8, U16], &[2]);
const SINGLE_16: WireFormat = WireFormat::addressed(&[U8, U16], &[1]);
const PAIR_8: WireFormat = WireFormat::addressed(&[U8, U8, U8], &[1, 2]);
const PAIR_16: WireFormat = WireFormat::addressed(&[U8, U16, U16], &[1, 2]);
const TRIPLE_16: WireFormat = WireFormat::addressed(&[U8, U16, U16, U16], &[1, 2, 3]);
const JUMP_32: WireFormat = WireFormat::unaddressed(&[U32]);
const JUMPI_32: WireFormat = WireFormat::addressed(&[U8, U32, U16], &[2]);
const NONE: WireFormat = WireFormat::unaddressed(&[]);
const SET_8: WireFormat = WireFormat::addressed(&[U8, TAG, U8, U8], &[2]);
const SET_16: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U16], &[2]);
const SET_32: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U32], &[2]);
const SET_64: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U64], &[2]);
const SET_128: WireFormat = WireFormat::addressed(&[U8, TAG, U16, U128], &[2]);
const SET_FF: WireFormat = WireFormat::addressed(&[U8, TAG, U16, FF], &[2]);
const CALL: WireFormat = WireFormat::addressed(&[U16, U16, U16, U16, U16, U16], &[1, 2, 3, 4, 5]);
const MSM: WireFormat = WireFormat::addressed(&[U8, U16, U16, U16, U16], &[1, 2, 3, 4]);
