use crate::{Opcode, Tag};
use alloc::borrow::Cow;
use core::fmt;

/// Exit result.
pub type ExitResult = Result<ExitSucceed, ExitError>;

/// Failure while turning a byte stream into instructions. Fatal to loading a
/// frame, never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
	/// Opcode byte beyond the defined range, or absent from the active
	/// instruction set.
	InvalidOpcode { position: usize, byte: u8 },
	/// A `TAG` operand byte is not a recognized tag.
	InvalidTagValue { position: usize, byte: u8 },
	/// The buffer ended in the middle of an instruction.
	ParsingError { position: usize },
	/// Operands handed to `Instruction::new` do not follow the opcode's wire
	/// format.
	OperandMismatch { opcode: Opcode },
}

impl fmt::Display for DecodeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidOpcode { position, byte } => {
				write!(f, "invalid opcode 0x{:02x} at byte {}", byte, position)
			}
			Self::InvalidTagValue { position, byte } => {
				write!(f, "invalid tag value {} at byte {}", byte, position)
			}
			Self::ParsingError { position } => {
				write!(f, "bytecode ended mid-instruction at byte {}", position)
			}
			Self::OperandMismatch { opcode } => {
				write!(f, "operands do not match the wire format of {}", opcode)
			}
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Error reported by a host collaborator (world state, contract loader).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostError(pub Cow<'static, str>);

impl HostError {
	pub fn new<S: Into<Cow<'static, str>>>(message: S) -> Self {
		Self(message.into())
	}
}

impl fmt::Display for HostError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Semantic failure of a single instruction. Halts the current frame in the
/// reverted state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExitException {
	/// An operand cell carries a different tag than the instruction requires.
	TypeMismatch { expected: Tag, found: Tag },
	/// The operation is not defined for this tag (e.g. bitwise on `FIELD`).
	UnsupportedTag(Tag),
	/// Divisor is the zero of its domain.
	DivisionByZero,
	/// Relative or slice addressing left the 32-bit offset space.
	AddressOutOfRange,
	/// MSM points array length is not a multiple of 3.
	PointsLength(u32),
	/// A finite MSM input point does not satisfy the curve equation.
	PointNotOnCurve,
	/// An MSM scalar limb does not fit in 128 bits.
	ScalarLimbTooLarge,
	/// Either gas dimension would go negative.
	OutOfGas,
	/// Jump target outside the instruction sequence.
	InvalidJump(u32),
	/// Execution ran past the last instruction.
	PcOutOfRange(usize),
	/// `INTERNALRETURN` with an empty internal call stack.
	InternalReturnWithoutCall,
	/// Unknown `GETENVVAR` selector.
	InvalidEnvVar(u8),
	/// State-modifying instruction inside a static call.
	StaticCallAlteration,
	/// Nested call beyond the configured depth limit.
	CallTooDeep,
	/// A collaborator call failed.
	Host(HostError),
}

impl fmt::Display for ExitException {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TypeMismatch { expected, found } => {
				write!(f, "tag mismatch: expected {}, found {}", expected, found)
			}
			Self::UnsupportedTag(tag) => write!(f, "operation not supported for tag {}", tag),
			Self::DivisionByZero => f.write_str("division by zero"),
			Self::AddressOutOfRange => f.write_str("memory address out of range"),
			Self::PointsLength(len) => {
				write!(f, "points array length {} is not a multiple of 3", len)
			}
			Self::PointNotOnCurve => f.write_str("point is not on the curve"),
			Self::ScalarLimbTooLarge => f.write_str("scalar limb does not fit in 128 bits"),
			Self::OutOfGas => f.write_str("out of gas"),
			Self::InvalidJump(target) => write!(f, "invalid jump destination {}", target),
			Self::PcOutOfRange(pc) => write!(f, "program counter {} out of range", pc),
			Self::InternalReturnWithoutCall => f.write_str("internal return without internal call"),
			Self::InvalidEnvVar(var) => write!(f, "invalid environment variable {}", var),
			Self::StaticCallAlteration => f.write_str("state modification in static call"),
			Self::CallTooDeep => f.write_str("call stack too deep"),
			Self::Host(e) => write!(f, "host error: {}", e),
		}
	}
}

impl From<HostError> for ExitException {
	fn from(e: HostError) -> Self {
		Self::Host(e)
	}
}

/// Exit error reason.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExitError {
	/// Machine encountered a semantic failure.
	Exception(ExitException),
	/// Machine executed an explicit `REVERT`.
	Reverted,
	/// Bytecode of the frame could not be decoded.
	Decode(DecodeError),
}

impl From<ExitException> for ExitError {
	fn from(e: ExitException) -> Self {
		Self::Exception(e)
	}
}

impl From<DecodeError> for ExitError {
	fn from(e: DecodeError) -> Self {
		Self::Decode(e)
	}
}

impl From<ExitException> for ExitResult {
	fn from(e: ExitException) -> Self {
		Err(ExitError::Exception(e))
	}
}

impl From<ExitError> for ExitResult {
	fn from(e: ExitError) -> Self {
		Err(e)
	}
}

impl fmt::Display for ExitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Exception(e) => fmt::Display::fmt(e, f),
			Self::Reverted => f.write_str("explicit revert"),
			Self::Decode(e) => write!(f, "bytecode decoding failed: {}", e),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for ExitError {}

/// Exit succeed reason.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitSucceed {
	/// Machine encountered an explicit return.
	Returned,
}

impl From<ExitSucceed> for ExitResult {
	fn from(s: ExitSucceed) -> Self {
		Ok(s)
	}
}
