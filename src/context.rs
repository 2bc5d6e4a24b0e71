use crate::{ExitException, FieldElement, MemoryValue};
use alloc::vec::Vec;

/// Block and chain level values shared by every frame of an execution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalVariables {
	pub chain_id: FieldElement,
	pub version: FieldElement,
	pub block_number: u32,
	pub timestamp: u64,
	pub fee_per_l2_gas: FieldElement,
	pub fee_per_da_gas: FieldElement,
}

/// Read-only context of a single frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecutionEnvironment {
	/// Address of the executing contract.
	pub address: FieldElement,
	/// Address of the caller.
	pub sender: FieldElement,
	pub transaction_fee: FieldElement,
	/// Whether state modifications are forbidden.
	pub is_static: bool,
	/// Arguments of the call.
	pub calldata: Vec<FieldElement>,
	/// Number of frames below this one.
	pub depth: usize,
	pub globals: GlobalVariables,
}

impl ExecutionEnvironment {
	pub fn new(address: FieldElement, sender: FieldElement, calldata: Vec<FieldElement>) -> Self {
		Self {
			address,
			sender,
			calldata,
			..Default::default()
		}
	}

	/// Environment of a frame called from this one. A static caller makes
	/// every callee static.
	pub fn nested(&self, address: FieldElement, calldata: Vec<FieldElement>, is_static: bool) -> Self {
		Self {
			address,
			sender: self.address,
			transaction_fee: self.transaction_fee,
			is_static: self.is_static || is_static,
			calldata,
			depth: self.depth + 1,
			globals: self.globals.clone(),
		}
	}
}

/// Selector of `GETENVVAR_16`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum EnvVar {
	Address = 0,
	Sender = 1,
	TransactionFee = 2,
	ChainId = 3,
	Version = 4,
	BlockNumber = 5,
	Timestamp = 6,
	FeePerL2Gas = 7,
	FeePerDaGas = 8,
	IsStaticCall = 9,
	L2GasLeft = 10,
	DaGasLeft = 11,
}

impl EnvVar {
	pub fn from_u8(byte: u8) -> Result<EnvVar, ExitException> {
		Ok(match byte {
			0 => EnvVar::Address,
			1 => EnvVar::Sender,
			2 => EnvVar::TransactionFee,
			3 => EnvVar::ChainId,
			4 => EnvVar::Version,
			5 => EnvVar::BlockNumber,
			6 => EnvVar::Timestamp,
			7 => EnvVar::FeePerL2Gas,
			8 => EnvVar::FeePerDaGas,
			9 => EnvVar::IsStaticCall,
			10 => EnvVar::L2GasLeft,
			11 => EnvVar::DaGasLeft,
			_ => return Err(ExitException::InvalidEnvVar(byte)),
		})
	}

	/// Value of the variable. Gas left is only known to the frame, so it is
	/// passed in.
	pub fn read(self, environment: &ExecutionEnvironment, l2_gas_left: u32, da_gas_left: u32) -> MemoryValue {
		let globals = &environment.globals;
		match self {
			EnvVar::Address => MemoryValue::Field(environment.address),
			EnvVar::Sender => MemoryValue::Field(environment.sender),
			EnvVar::TransactionFee => MemoryValue::Field(environment.transaction_fee),
			EnvVar::ChainId => MemoryValue::Field(globals.chain_id),
			EnvVar::Version => MemoryValue::Field(globals.version),
			EnvVar::BlockNumber => MemoryValue::U32(globals.block_number),
			EnvVar::Timestamp => MemoryValue::U64(globals.timestamp),
			EnvVar::FeePerL2Gas => MemoryValue::Field(globals.fee_per_l2_gas),
			EnvVar::FeePerDaGas => MemoryValue::Field(globals.fee_per_da_gas),
			EnvVar::IsStaticCall => MemoryValue::from_bool(environment.is_static),
			EnvVar::L2GasLeft => MemoryValue::U32(l2_gas_left),
			EnvVar::DaGasLeft => MemoryValue::U32(da_gas_left),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nested_environment() {
		let mut root = ExecutionEnvironment::new(
			FieldElement::from(1u64),
			FieldElement::from(9u64),
			Vec::new(),
		);
		root.globals.block_number = 7;
		let child = root.nested(FieldElement::from(2u64), vec![FieldElement::one()], false);
		assert_eq!(child.sender, root.address);
		assert_eq!(child.depth, 1);
		assert!(!child.is_static);
		assert_eq!(child.globals.block_number, 7);

		let grandchild = child
			.nested(FieldElement::from(3u64), Vec::new(), true)
			.nested(FieldElement::from(4u64), Vec::new(), false);
		assert!(grandchild.is_static);
		assert_eq!(grandchild.depth, 3);
	}

	#[test]
	fn env_var_selectors() {
		let environment = ExecutionEnvironment::default();
		assert_eq!(
			EnvVar::from_u8(9).unwrap().read(&environment, 0, 0),
			MemoryValue::U1(0)
		);
		assert_eq!(
			EnvVar::from_u8(10).unwrap().read(&environment, 55, 66),
			MemoryValue::U32(55)
		);
		assert_eq!(EnvVar::from_u8(12), Err(ExitException::InvalidEnvVar(12)));
	}
}
