//! Allows to listen to gasometer events.

use super::{Gas, Snapshot};
use avm_core::Opcode;

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

impl Snapshot {
	pub fn gas(&self) -> Gas {
		self.limit.saturating_sub(self.used)
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
	RecordBase {
		opcode: Opcode,
		cost: Gas,
		snapshot: Snapshot,
	},
	RecordDynamic {
		opcode: Opcode,
		size: u32,
		cost: Gas,
		snapshot: Snapshot,
	},
	RecordCost {
		cost: Gas,
		snapshot: Snapshot,
	},
	RecordRefund {
		refund: Gas,
		snapshot: Snapshot,
	},
	OutOfGas {
		cost: Gas,
		snapshot: Snapshot,
	},
}

impl Event {
	pub(crate) fn emit(self) {
		listener::with(|listener| listener.event(self));
	}
}

/// Run closure with provided listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
