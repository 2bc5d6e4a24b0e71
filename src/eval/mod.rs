#[macro_use]
mod macros;
mod arithmetic;
mod environment;
mod flow;
mod misc;
mod msm;
mod system;

use crate::gasometer::Gas;
use crate::{ExitResult, FieldElement, Frame, Instruction, MemoryValue, Opcode, Resolved, WorldState};
use alloc::vec::Vec;

pub use self::msm::{msm, Point, ScalarLimbs};

/// Outcome of evaluating one instruction.
pub enum Control {
	Continue,
	/// Continue at the given instruction index.
	Jump(u32),
	Exit(ExitResult),
	/// Suspend the frame until the nested call completes.
	Call(CallRequest),
}

/// A nested call requested by `CALL` or `STATICCALL`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallRequest {
	pub address: FieldElement,
	pub calldata: Vec<FieldElement>,
	/// Gas handed to the callee, already charged to the caller.
	pub gas: Gas,
	pub is_static: bool,
}

pub fn eval<H: WorldState>(
	frame: &mut Frame,
	instruction: &Instruction,
	pc: usize,
	resolved: &Resolved,
	host: &mut H,
) -> Control {
	use Opcode::*;

	let tag = instruction.in_tag();
	match instruction.opcode() {
		Add8 | Add16 => arithmetic::binary(frame, tag, resolved, MemoryValue::add),
		Sub8 | Sub16 => arithmetic::binary(frame, tag, resolved, MemoryValue::sub),
		Mul8 | Mul16 => arithmetic::binary(frame, tag, resolved, MemoryValue::mul),
		Div8 | Div16 => arithmetic::binary(frame, tag, resolved, MemoryValue::div),
		Eq8 | Eq16 => arithmetic::binary(frame, tag, resolved, MemoryValue::equal),
		Lt8 | Lt16 => arithmetic::binary(frame, tag, resolved, MemoryValue::lt),
		Lte8 | Lte16 => arithmetic::binary(frame, tag, resolved, MemoryValue::lte),
		And8 | And16 => arithmetic::binary(frame, tag, resolved, MemoryValue::and),
		Or8 | Or16 => arithmetic::binary(frame, tag, resolved, MemoryValue::or),
		Xor8 | Xor16 => arithmetic::binary(frame, tag, resolved, MemoryValue::xor),
		Shl8 | Shl16 => arithmetic::binary(frame, tag, resolved, MemoryValue::shl),
		Shr8 | Shr16 => arithmetic::binary(frame, tag, resolved, MemoryValue::shr),
		Not8 | Not16 => arithmetic::not(frame, tag, resolved),
		Cast8 | Cast16 => arithmetic::cast(frame, tag, resolved),

		GetEnvVar16 => environment::getenvvar(frame, instruction.operand(1) as u8, resolved),
		CalldataCopy => environment::calldatacopy(frame, resolved),
		SuccessCopy => environment::successcopy(frame, resolved),
		ReturndataSize => environment::returndatasize(frame, resolved),
		ReturndataCopy => environment::returndatacopy(frame, resolved),

		Jump32 => flow::jump(instruction.operand(0)),
		JumpI32 => flow::jumpi(frame, instruction.operand(1), resolved),
		InternalCall => flow::internalcall(frame, pc, instruction.operand(0)),
		InternalReturn => flow::internalreturn(frame),

		Set8 | Set16 | Set32 | Set64 | Set128 | SetFf => misc::set(frame, tag, instruction, resolved),
		Mov8 | Mov16 => misc::mov(frame, resolved),

		SLoad => system::sload(frame, resolved, host),
		SStore => system::sstore(frame, resolved, host),
		NullifierExists => system::nullifierexists(frame, resolved, host),
		EmitNullifier => system::emitnullifier(frame, resolved, host),

		Call => system::call(frame, Call, resolved, false),
		StaticCall => system::call(frame, StaticCall, resolved, true),
		Return => system::ret(frame, resolved),
		Revert8 | Revert16 => system::revert(frame, instruction.opcode(), resolved),

		Msm => msm::eval(frame, resolved),
	}
}
