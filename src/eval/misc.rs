use super::Control;
use crate::{Frame, Instruction, MemoryValue, Operand, Resolved, Tag};

#[inline]
pub fn set(frame: &mut Frame, tag: Tag, instruction: &Instruction, resolved: &Resolved) -> Control {
	let constant = instruction
		.operand_value(3)
		.map(Operand::as_u256)
		.unwrap_or_default();
	frame.memory.set(resolved[0], MemoryValue::from_u256(tag, constant));
	Control::Continue
}

#[inline]
pub fn mov(frame: &mut Frame, resolved: &Resolved) -> Control {
	let value = frame.memory.get(resolved[0]);
	frame.memory.set(resolved[1], value);
	Control::Continue
}
