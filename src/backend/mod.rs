//! Host backends.

mod memory;

pub use self::memory::InMemoryHost;

/// What happens to a substate's writes when it is closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeStrategy {
	Commit,
	Revert,
}
