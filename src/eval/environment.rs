use super::Control;
use crate::{EnvVar, FieldElement, Frame, MemoryValue, Opcode, Resolved, Tag};
use alloc::vec::Vec;

pub fn getenvvar(frame: &mut Frame, var: u8, resolved: &Resolved) -> Control {
	let var = try_or_fail!(EnvVar::from_u8(var));
	let gas_left = frame.gasometer.gas_left();
	let value = var.read(&frame.environment, gas_left.l2_gas, gas_left.da_gas);
	frame.memory.set(resolved[0], value);
	Control::Continue
}

/// Window `[start, start + size)` of `source`, zero-padded past its end.
fn window(source: &[FieldElement], start: u32, size: u32) -> Vec<MemoryValue> {
	(0..size)
		.map(|i| {
			let index = (start as usize).saturating_add(i as usize);
			MemoryValue::Field(source.get(index).copied().unwrap_or_default())
		})
		.collect()
}

/// Reads the `UINT32` start and size operands and charges for the copy.
fn copy_bounds(frame: &mut Frame, opcode: Opcode, resolved: &Resolved) -> Result<(u32, u32), crate::ExitException> {
	let (start, size) = (resolved[0], resolved[1]);
	frame.memory.check_tags(Tag::Uint32, &[size, start])?;
	let size = frame.memory.get_u32(size)?;
	let start = frame.memory.get_u32(start)?;
	frame.gasometer.record_dynamic(opcode, size)?;
	Ok((size, start))
}

pub fn calldatacopy(frame: &mut Frame, resolved: &Resolved) -> Control {
	let (size, start) = try_or_fail!(copy_bounds(frame, Opcode::CalldataCopy, resolved));
	let values = window(&frame.environment.calldata, start, size);
	try_or_fail!(frame.memory.set_slice(resolved[2], &values));
	Control::Continue
}

pub fn returndatacopy(frame: &mut Frame, resolved: &Resolved) -> Control {
	let (size, start) = try_or_fail!(copy_bounds(frame, Opcode::ReturndataCopy, resolved));
	let values = window(&frame.returndata, start, size);
	try_or_fail!(frame.memory.set_slice(resolved[2], &values));
	Control::Continue
}

pub fn returndatasize(frame: &mut Frame, resolved: &Resolved) -> Control {
	let size = frame.returndata.len() as u32;
	frame.memory.set(resolved[0], MemoryValue::U32(size));
	Control::Continue
}

pub fn successcopy(frame: &mut Frame, resolved: &Resolved) -> Control {
	frame.memory.set(resolved[0], MemoryValue::from_bool(frame.success));
	Control::Continue
}
