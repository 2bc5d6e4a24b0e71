use crate::{FieldElement, HostError};
use alloc::vec::Vec;

/// Journaled world state: public storage and nullifiers.
///
/// Writes made between `enter` and `exit_revert` must be discarded as a
/// whole; `exit_commit` folds them into the enclosing substate.
#[auto_impl::auto_impl(&mut, Box)]
pub trait WorldState {
	/// Read a storage slot of a contract. Unwritten slots read as zero.
	fn storage_read(&self, address: FieldElement, slot: FieldElement) -> Result<FieldElement, HostError>;
	/// Write a storage slot of a contract.
	fn storage_write(
		&mut self,
		address: FieldElement,
		slot: FieldElement,
		value: FieldElement,
	) -> Result<(), HostError>;
	/// Check whether a nullifier has been emitted by a contract.
	fn nullifier_exists(&self, address: FieldElement, nullifier: FieldElement) -> Result<bool, HostError>;
	/// Emit a new nullifier. Emitting an existing one is an error.
	fn emit_nullifier(&mut self, address: FieldElement, nullifier: FieldElement) -> Result<(), HostError>;

	/// Open a substate for a nested frame.
	fn enter(&mut self);
	/// Keep the writes of the innermost substate.
	fn exit_commit(&mut self) -> Result<(), HostError>;
	/// Drop the writes of the innermost substate.
	fn exit_revert(&mut self) -> Result<(), HostError>;
}

/// Source of contract bytecode.
#[auto_impl::auto_impl(&, &mut, Box)]
pub trait ContractLoader {
	/// Bytecode deployed at `address`.
	fn load_bytecode(&self, address: FieldElement) -> Result<Vec<u8>, HostError>;
}

/// Everything the executor needs from its environment.
pub trait Host: WorldState + ContractLoader {}

impl<T: WorldState + ContractLoader> Host for T {}
