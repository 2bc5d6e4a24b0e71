//! Allows to listen to runtime events.

use crate::{FieldElement, Opcode};

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
	Step {
		address: FieldElement,
		depth: usize,
		pc: usize,
		opcode: Opcode,
	},
	Enter {
		address: FieldElement,
		depth: usize,
		is_static: bool,
	},
	Exit {
		address: FieldElement,
		depth: usize,
		success: bool,
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
