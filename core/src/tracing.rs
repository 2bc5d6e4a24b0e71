//! Allows to listen to memory accesses.

use crate::MemoryValue;

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
	MemoryRead { offset: u32, value: MemoryValue },
	MemoryWrite { offset: u32, value: MemoryValue },
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
