//! Core data layer of the Aztec Virtual Machine: tagged memory, addressing
//! and the bytecode codec.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "tracing")]
pub mod tracing;

mod addressing;
pub mod codec;
mod error;
mod field;
mod instruction;
mod memory;
mod opcode;
mod tag;
mod value;

pub use crate::addressing::{AddressingMode, Resolved, BASE_POINTER_OFFSET, MAX_OPERANDS};
pub use crate::codec::{decode, encode, InstructionSet, Operand, OperandType, WireFormat};
pub use crate::error::{
	DecodeError, ExitError, ExitException, ExitResult, ExitSucceed, HostError,
};
pub use crate::field::{FieldElement, Fr};
pub use crate::instruction::Instruction;
pub use crate::memory::Memory;
pub use crate::opcode::Opcode;
pub use crate::tag::Tag;
pub use crate::value::MemoryValue;
pub use primitive_types::U256;
