use crate::consts::*;
use crate::{Config, Gas};
use avm_core::{ExitException, Opcode};

/// Fixed cost of an opcode, before addressing surcharges.
pub fn base_cost(opcode: Opcode, config: &Config) -> Gas {
	use Opcode::*;

	match opcode {
		Add8 | Add16 | Sub8 | Sub16 | Mul8 | Mul16 | Div8 | Div16 => Gas::l2(G_ALU),
		Eq8 | Eq16 | Lt8 | Lt16 | Lte8 | Lte16 => Gas::l2(G_ALU),
		And8 | And16 | Or8 | Or16 | Xor8 | Xor16 | Not8 | Not16 => Gas::l2(G_ALU),
		Shl8 | Shl16 | Shr8 | Shr16 | Cast8 | Cast16 => Gas::l2(G_ALU),

		GetEnvVar16 | SuccessCopy | ReturndataSize => Gas::l2(G_LOW),
		CalldataCopy | ReturndataCopy => Gas::l2(G_COPY),

		Jump32 | JumpI32 | InternalCall | InternalReturn => Gas::l2(G_LOW),
		Set8 | Set16 | Set32 | Set64 | Set128 | SetFf | Mov8 | Mov16 => Gas::l2(G_LOW),

		SLoad => Gas::l2(config.gas_sload),
		SStore => config.gas_sstore,
		NullifierExists => Gas::l2(G_NULLIFIER_EXISTS),
		EmitNullifier => config.gas_emit_nullifier,

		Call | StaticCall => Gas::l2(config.gas_call),
		Return | Revert8 | Revert16 => Gas::l2(G_LOW),

		Msm => Gas::l2(config.gas_msm),
	}
}

/// Per-unit rate of the size-dependent part of an opcode's cost. Units are
/// copied elements for the copy, call and halting opcodes, points for `MSM`.
pub fn dynamic_rate(opcode: Opcode, config: &Config) -> Gas {
	match opcode {
		Opcode::CalldataCopy | Opcode::ReturndataCopy => Gas::l2(config.gas_copy_per_element),
		Opcode::Return | Opcode::Revert8 | Opcode::Revert16 => {
			Gas::l2(config.gas_output_per_element)
		}
		Opcode::Call | Opcode::StaticCall => Gas::l2(config.gas_call_per_arg),
		Opcode::Msm => Gas::l2(config.gas_msm_per_point),
		_ => Gas::l2(G_ZERO),
	}
}

pub fn dynamic_cost(opcode: Opcode, size: u32, config: &Config) -> Result<Gas, ExitException> {
	let rate = dynamic_rate(opcode, config);
	Ok(Gas::new(
		rate.l2_gas.checked_mul(size).ok_or(ExitException::OutOfGas)?,
		rate.da_gas.checked_mul(size).ok_or(ExitException::OutOfGas)?,
	))
}

/// Surcharge for operands that needed address resolution.
pub fn addressing_cost(
	indirect: usize,
	relative: usize,
	config: &Config,
) -> Result<Gas, ExitException> {
	let surcharge = |count: usize, rate: u32| -> Result<u32, ExitException> {
		u32::try_from(count)
			.ok()
			.and_then(|count| count.checked_mul(rate))
			.ok_or(ExitException::OutOfGas)
	};
	let l2_gas = surcharge(indirect, config.l2_gas_per_indirect)?
		.checked_add(surcharge(relative, config.l2_gas_per_relative)?)
		.ok_or(ExitException::OutOfGas)?;
	Ok(Gas::l2(l2_gas))
}
