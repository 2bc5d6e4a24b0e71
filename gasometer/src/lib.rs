//! Gas metering of the Aztec Virtual Machine.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "tracing")]
pub mod tracing;

mod consts;
mod costs;

pub use crate::costs::{addressing_cost, base_cost, dynamic_cost, dynamic_rate};

use avm_core::{ExitException, Opcode};
use core::cmp::min;
use core::fmt;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {
		$x.emit();
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

/// An amount of gas in both dimensions: execution (L2) gas and
/// data-availability gas.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gas {
	pub l2_gas: u32,
	pub da_gas: u32,
}

impl Gas {
	pub const fn new(l2_gas: u32, da_gas: u32) -> Self {
		Self { l2_gas, da_gas }
	}

	/// Execution gas only.
	pub const fn l2(l2_gas: u32) -> Self {
		Self { l2_gas, da_gas: 0 }
	}

	pub const fn zero() -> Self {
		Self::new(0, 0)
	}

	pub const fn is_zero(&self) -> bool {
		self.l2_gas == 0 && self.da_gas == 0
	}

	pub fn checked_add(self, other: Gas) -> Option<Gas> {
		Some(Gas::new(
			self.l2_gas.checked_add(other.l2_gas)?,
			self.da_gas.checked_add(other.da_gas)?,
		))
	}

	/// Subtract in both dimensions, `None` if either would go negative.
	pub fn checked_sub(self, other: Gas) -> Option<Gas> {
		Some(Gas::new(
			self.l2_gas.checked_sub(other.l2_gas)?,
			self.da_gas.checked_sub(other.da_gas)?,
		))
	}

	pub fn saturating_sub(self, other: Gas) -> Gas {
		Gas::new(
			self.l2_gas.saturating_sub(other.l2_gas),
			self.da_gas.saturating_sub(other.da_gas),
		)
	}

	/// Per-dimension minimum.
	pub fn min(self, other: Gas) -> Gas {
		Gas::new(min(self.l2_gas, other.l2_gas), min(self.da_gas, other.da_gas))
	}
}

impl fmt::Display for Gas {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "l2={} da={}", self.l2_gas, self.da_gas)
	}
}

/// Gas schedule.
#[derive(Clone, Debug)]
pub struct Config {
	/// Execution gas per operand resolved through indirection.
	pub l2_gas_per_indirect: u32,
	/// Execution gas per operand resolved relative to the base pointer.
	pub l2_gas_per_relative: u32,
	/// Gas paid for SLOAD.
	pub gas_sload: u32,
	/// Gas paid for SSTORE, in both dimensions.
	pub gas_sstore: Gas,
	/// Gas paid for EMITNULLIFIER, in both dimensions.
	pub gas_emit_nullifier: Gas,
	/// Gas paid for CALL and STATICCALL, on top of the gas handed to the
	/// callee.
	pub gas_call: u32,
	/// Gas per calldata element copied by CALL and STATICCALL.
	pub gas_call_per_arg: u32,
	pub gas_msm: u32,
	pub gas_msm_per_point: u32,
	/// Gas per element moved by CALLDATACOPY and RETURNDATACOPY.
	pub gas_copy_per_element: u32,
	/// Gas per element of RETURN and REVERT output.
	pub gas_output_per_element: u32,
}

impl Config {
	/// Standard gas schedule.
	pub const fn standard() -> Config {
		Config {
			l2_gas_per_indirect: consts::G_INDIRECT,
			l2_gas_per_relative: consts::G_RELATIVE,
			gas_sload: consts::G_SLOAD,
			gas_sstore: Gas::new(consts::G_SSTORE, consts::G_SSTORE_DA),
			gas_emit_nullifier: Gas::new(consts::G_EMIT_NULLIFIER, consts::G_EMIT_NULLIFIER_DA),
			gas_call: consts::G_CALL,
			gas_call_per_arg: consts::G_CALL_PER_ARG,
			gas_msm: consts::G_MSM,
			gas_msm_per_point: consts::G_MSM_PER_POINT,
			gas_copy_per_element: consts::G_COPY_PER_ELEMENT,
			gas_output_per_element: consts::G_OUTPUT_PER_ELEMENT,
		}
	}
}

/// Gas counters of one frame at a point in time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Snapshot {
	pub limit: Gas,
	pub used: Gas,
}

/// Gasometer of a single frame. Once a charge fails the gasometer stays
/// failed and reports no gas left in either dimension.
#[derive(Clone)]
pub struct Gasometer<'config> {
	limit: Gas,
	inner: Result<Inner<'config>, ExitException>,
}

#[derive(Clone)]
struct Inner<'config> {
	used: Gas,
	config: &'config Config,
}

impl<'config> Gasometer<'config> {
	/// Create a new gasometer with the given gas limit and config.
	pub fn new(limit: Gas, config: &'config Config) -> Self {
		Self {
			limit,
			inner: Ok(Inner {
				used: Gas::zero(),
				config,
			}),
		}
	}

	#[inline]
	fn inner_mut(&mut self) -> Result<&mut Inner<'config>, ExitException> {
		self.inner.as_mut().map_err(|e| e.clone())
	}

	/// Reference to the config, if the gasometer has not failed.
	pub fn config(&self) -> Option<&'config Config> {
		self.inner.as_ref().ok().map(|inner| inner.config)
	}

	pub fn limit(&self) -> Gas {
		self.limit
	}

	/// Remaining gas. Zero in both dimensions after a failure.
	pub fn gas_left(&self) -> Gas {
		match &self.inner {
			Ok(inner) => self.limit.saturating_sub(inner.used),
			Err(_) => Gas::zero(),
		}
	}

	pub fn used(&self) -> Gas {
		match &self.inner {
			Ok(inner) => inner.used,
			Err(_) => self.limit,
		}
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			limit: self.limit,
			used: self.used(),
		}
	}

	/// Fail the gasometer, consuming all remaining gas.
	pub fn fail(&mut self) -> ExitException {
		self.inner = Err(ExitException::OutOfGas);
		ExitException::OutOfGas
	}

	/// Record an explicit cost. Fails if either dimension would go negative.
	pub fn record_cost(&mut self, cost: Gas) -> Result<(), ExitException> {
		event!(tracing::Event::RecordCost {
			cost,
			snapshot: self.snapshot(),
		});
		self.charge(cost)
	}

	/// Record the cost charged before an opcode runs: its base cost plus the
	/// surcharge for operands that needed address resolution.
	pub fn record_base(
		&mut self,
		opcode: Opcode,
		indirect: usize,
		relative: usize,
	) -> Result<(), ExitException> {
		let config = self.inner_mut()?.config;
		let cost = match addressing_cost(indirect, relative, config)
			.and_then(|surcharge| {
				base_cost(opcode, config)
					.checked_add(surcharge)
					.ok_or(ExitException::OutOfGas)
			}) {
			Ok(cost) => cost,
			Err(e) => {
				self.inner = Err(e.clone());
				return Err(e);
			}
		};
		event!(tracing::Event::RecordBase {
			opcode,
			cost,
			snapshot: self.snapshot(),
		});
		self.charge(cost)
	}

	/// Record the size-dependent cost of an opcode: elements copied, or
	/// points processed.
	pub fn record_dynamic(&mut self, opcode: Opcode, size: u32) -> Result<(), ExitException> {
		let config = self.inner_mut()?.config;
		let cost = match dynamic_cost(opcode, size, config) {
			Ok(cost) => cost,
			Err(e) => {
				self.inner = Err(e.clone());
				return Err(e);
			}
		};
		event!(tracing::Event::RecordDynamic {
			opcode,
			size,
			cost,
			snapshot: self.snapshot(),
		});
		self.charge(cost)
	}

	/// Set aside gas for a nested call: at most the remaining amount in each
	/// dimension. Returns the amount actually allocated, which is charged to
	/// this frame until refunded.
	pub fn record_allocation(&mut self, requested: Gas) -> Result<Gas, ExitException> {
		let allocated = requested.min(self.gas_left());
		self.record_cost(allocated)?;
		Ok(allocated)
	}

	/// Return unused gas, e.g. what a nested call did not spend.
	pub fn record_refund(&mut self, refund: Gas) -> Result<(), ExitException> {
		event!(tracing::Event::RecordRefund {
			refund,
			snapshot: self.snapshot(),
		});
		let inner = self.inner_mut()?;
		inner.used = inner.used.saturating_sub(refund);
		Ok(())
	}

	fn charge(&mut self, cost: Gas) -> Result<(), ExitException> {
		let left = self.gas_left();
		let inner = self.inner_mut()?;
		match left.checked_sub(cost) {
			Some(_) => {
				inner.used = Gas::new(
					inner.used.l2_gas + cost.l2_gas,
					inner.used.da_gas + cost.da_gas,
				);
				Ok(())
			}
			None => {
				event!(tracing::Event::OutOfGas {
					cost,
					snapshot: self.snapshot(),
				});
				log::debug!(target: "avm", "out of gas: cost {}, left {}", cost, left);
				Err(self.fail())
			}
		}
	}
}
