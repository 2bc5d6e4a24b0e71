use super::Control;
use crate::{ExitException, Frame, Resolved, Tag};

#[inline]
pub fn jump(target: u32) -> Control {
	Control::Jump(target)
}

/// Jump when the `UINT1` condition is set.
#[inline]
pub fn jumpi(frame: &mut Frame, target: u32, resolved: &Resolved) -> Control {
	let condition = try_or_fail!(frame.memory.get_tagged(resolved[0], Tag::Uint1));
	if condition.is_zero() {
		Control::Continue
	} else {
		Control::Jump(target)
	}
}

pub fn internalcall(frame: &mut Frame, pc: usize, target: u32) -> Control {
	frame.internal_call_stack.push(pc + 1);
	Control::Jump(target)
}

pub fn internalreturn(frame: &mut Frame) -> Control {
	match frame.internal_call_stack.pop() {
		Some(pc) => Control::Jump(pc as u32),
		None => Control::Exit(ExitException::InternalReturnWithoutCall.into()),
	}
}
