use super::{CallRequest, Control};
use crate::gasometer::Gas;
use crate::{
	ExitError, ExitSucceed, FieldElement, Frame, MemoryValue, Opcode, Resolved, Tag, WorldState,
};
use alloc::vec::Vec;

pub fn sload<H: WorldState>(frame: &mut Frame, resolved: &Resolved, host: &mut H) -> Control {
	let (slot, dst) = (resolved[0], resolved[1]);
	let slot = try_or_fail!(frame.memory.get_tagged(slot, Tag::Field)).to_field();
	let value = try_or_fail!(host.storage_read(frame.environment.address, slot));
	frame.memory.set(dst, MemoryValue::Field(value));
	Control::Continue
}

/// The stored value may carry any tag; it is written as a field element.
pub fn sstore<H: WorldState>(frame: &mut Frame, resolved: &Resolved, host: &mut H) -> Control {
	check_static!(frame);
	let (src, slot) = (resolved[0], resolved[1]);
	let slot = try_or_fail!(frame.memory.get_tagged(slot, Tag::Field)).to_field();
	let value = frame.memory.get(src).to_field();
	try_or_fail!(host.storage_write(frame.environment.address, slot, value));
	Control::Continue
}

pub fn nullifierexists<H: WorldState>(frame: &mut Frame, resolved: &Resolved, host: &mut H) -> Control {
	let (nullifier, address, dst) = (resolved[0], resolved[1], resolved[2]);
	try_or_fail!(frame.memory.check_tags(Tag::Field, &[nullifier, address]));
	let nullifier = frame.memory.get(nullifier).to_field();
	let address = frame.memory.get(address).to_field();
	let exists = try_or_fail!(host.nullifier_exists(address, nullifier));
	frame.memory.set(dst, MemoryValue::from_bool(exists));
	Control::Continue
}

pub fn emitnullifier<H: WorldState>(frame: &mut Frame, resolved: &Resolved, host: &mut H) -> Control {
	check_static!(frame);
	let nullifier = try_or_fail!(frame.memory.get_tagged(resolved[0], Tag::Field)).to_field();
	try_or_fail!(host.emit_nullifier(frame.environment.address, nullifier));
	Control::Continue
}

/// Prepare a nested call. The callee's gas is taken from this frame now and
/// what it leaves unused is refunded when it halts.
pub fn call(frame: &mut Frame, opcode: Opcode, resolved: &Resolved, is_static: bool) -> Control {
	let (l2_gas, da_gas, address, args_size, args) =
		(resolved[0], resolved[1], resolved[2], resolved[3], resolved[4]);
	try_or_fail!(frame.memory.check_tags(Tag::Uint32, &[l2_gas, da_gas, args_size]));
	try_or_fail!(frame.memory.check_tag(Tag::Field, address));

	let requested = Gas::new(
		try_or_fail!(frame.memory.get_u32(l2_gas)),
		try_or_fail!(frame.memory.get_u32(da_gas)),
	);
	let address = frame.memory.get(address).to_field();
	let args_size = try_or_fail!(frame.memory.get_u32(args_size));
	try_or_fail!(frame.gasometer.record_dynamic(opcode, args_size));
	let calldata = to_fields(&try_or_fail!(frame.memory.get_slice(args, args_size)));
	let gas = try_or_fail!(frame.gasometer.record_allocation(requested));

	Control::Call(CallRequest {
		address,
		calldata,
		gas,
		is_static,
	})
}

fn to_fields(values: &[MemoryValue]) -> Vec<FieldElement> {
	values.iter().map(MemoryValue::to_field).collect()
}

/// Read the output window and its `UINT32` size, charging per element.
fn output(frame: &mut Frame, opcode: Opcode, resolved: &Resolved) -> Result<Vec<FieldElement>, crate::ExitException> {
	let (offset, size) = (resolved[0], resolved[1]);
	let size = frame.memory.get_u32(size)?;
	frame.gasometer.record_dynamic(opcode, size)?;
	Ok(to_fields(&frame.memory.get_slice(offset, size)?))
}

pub fn ret(frame: &mut Frame, resolved: &Resolved) -> Control {
	frame.output = try_or_fail!(output(frame, Opcode::Return, resolved));
	Control::Exit(ExitSucceed::Returned.into())
}

pub fn revert(frame: &mut Frame, opcode: Opcode, resolved: &Resolved) -> Control {
	frame.output = try_or_fail!(output(frame, opcode, resolved));
	Control::Exit(ExitError::Reverted.into())
}
