use super::MergeStrategy;
use crate::{ContractLoader, FieldElement, HostError, WorldState};
use alloc::{
	boxed::Box,
	collections::{BTreeMap, BTreeSet},
	vec::Vec,
};
use core::mem;

#[derive(Clone, Debug, Default)]
struct Substate {
	parent: Option<Box<Substate>>,
	storages: BTreeMap<(FieldElement, FieldElement), FieldElement>,
	nullifiers: BTreeSet<(FieldElement, FieldElement)>,
}

impl Substate {
	fn known_storage(&self, address: FieldElement, slot: FieldElement) -> Option<FieldElement> {
		if let Some(value) = self.storages.get(&(address, slot)) {
			Some(*value)
		} else if let Some(parent) = self.parent.as_ref() {
			parent.known_storage(address, slot)
		} else {
			None
		}
	}

	fn known_nullifier(&self, address: FieldElement, nullifier: FieldElement) -> bool {
		self.nullifiers.contains(&(address, nullifier))
			|| self
				.parent
				.as_ref()
				.map(|parent| parent.known_nullifier(address, nullifier))
				.unwrap_or(false)
	}

	fn depth(&self) -> usize {
		self.parent.as_ref().map(|parent| parent.depth() + 1).unwrap_or(0)
	}
}

/// Host keeping contracts, storage and nullifiers in memory, with a stack of
/// substates for nested frames.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHost {
	contracts: BTreeMap<FieldElement, Vec<u8>>,
	substate: Box<Substate>,
}

impl InMemoryHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Deploy bytecode at `address`, replacing whatever was there.
	pub fn set_contract(&mut self, address: FieldElement, bytecode: Vec<u8>) {
		self.contracts.insert(address, bytecode);
	}

	/// Current value of a storage slot, across all open substates.
	pub fn storage(&self, address: FieldElement, slot: FieldElement) -> FieldElement {
		self.substate.known_storage(address, slot).unwrap_or_default()
	}

	pub fn set_storage(&mut self, address: FieldElement, slot: FieldElement, value: FieldElement) {
		self.substate.storages.insert((address, slot), value);
	}

	pub fn has_nullifier(&self, address: FieldElement, nullifier: FieldElement) -> bool {
		self.substate.known_nullifier(address, nullifier)
	}

	/// Number of open nested substates.
	pub fn depth(&self) -> usize {
		self.substate.depth()
	}

	fn push_substate(&mut self) {
		let mut parent = Box::new(Substate::default());
		mem::swap(&mut parent, &mut self.substate);
		self.substate.parent = Some(parent);
	}

	fn pop_substate(&mut self, strategy: MergeStrategy) -> Result<(), HostError> {
		let mut child = self
			.substate
			.parent
			.take()
			.ok_or_else(|| HostError::new("no substate to exit"))?;
		mem::swap(&mut child, &mut self.substate);

		match strategy {
			MergeStrategy::Commit => {
				self.substate.storages.append(&mut child.storages);
				self.substate.nullifiers.append(&mut child.nullifiers);
			}
			MergeStrategy::Revert => {}
		}

		Ok(())
	}
}

impl WorldState for InMemoryHost {
	fn storage_read(&self, address: FieldElement, slot: FieldElement) -> Result<FieldElement, HostError> {
		Ok(self.storage(address, slot))
	}

	fn storage_write(
		&mut self,
		address: FieldElement,
		slot: FieldElement,
		value: FieldElement,
	) -> Result<(), HostError> {
		self.set_storage(address, slot, value);
		Ok(())
	}

	fn nullifier_exists(&self, address: FieldElement, nullifier: FieldElement) -> Result<bool, HostError> {
		Ok(self.has_nullifier(address, nullifier))
	}

	fn emit_nullifier(&mut self, address: FieldElement, nullifier: FieldElement) -> Result<(), HostError> {
		if self.has_nullifier(address, nullifier) {
			return Err(HostError::new("nullifier already exists"));
		}
		self.substate.nullifiers.insert((address, nullifier));
		Ok(())
	}

	fn enter(&mut self) {
		self.push_substate();
	}

	fn exit_commit(&mut self) -> Result<(), HostError> {
		self.pop_substate(MergeStrategy::Commit)
	}

	fn exit_revert(&mut self) -> Result<(), HostError> {
		self.pop_substate(MergeStrategy::Revert)
	}
}

impl ContractLoader for InMemoryHost {
	fn load_bytecode(&self, address: FieldElement) -> Result<Vec<u8>, HostError> {
		self.contracts
			.get(&address)
			.cloned()
			.ok_or_else(|| HostError::new("no contract at address"))
	}
}
