use crate::InstructionSet;

/// Runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
	/// Gas schedule.
	pub gasometer: crate::gasometer::Config,
	/// Maximum depth of nested calls.
	pub call_depth_limit: usize,
	/// Opcodes accepted by the decoder.
	pub instruction_set: InstructionSet,
}

impl Config {
	/// Standard configuration.
	pub const fn standard() -> Config {
		Config {
			gasometer: crate::gasometer::Config::standard(),
			call_depth_limit: 1024,
			instruction_set: InstructionSet::all(),
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::standard()
	}
}
