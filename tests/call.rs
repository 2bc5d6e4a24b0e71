mod common;

use avm::backend::InMemoryHost;
use avm::gasometer::Gas;
use avm::{
	AddressingMode, Config, ExitError, ExitException, Executor, FieldElement, Instruction, Opcode,
	Tag,
};
use common::*;

const CALLEE: u64 = 2;

/// Stores 42 at slot 7 and returns it.
fn storing_callee() -> Vec<Instruction> {
	vec![
		set(Tag::Field, 1, 42),
		set(Tag::Field, 2, 7),
		pair(Opcode::SStore, 1, 2),
		set(Tag::Uint32, 3, 1),
		ret(1, 3),
	]
}

/// Stores 42 at slot 7, then reverts with it.
fn reverting_callee() -> Vec<Instruction> {
	vec![
		set(Tag::Field, 1, 42),
		set(Tag::Field, 2, 7),
		pair(Opcode::SStore, 1, 2),
		set(Tag::Uint32, 3, 1),
		revert(1, 3),
	]
}

/// Calls `CALLEE` with the given gas and returns the callee's output followed
/// by the success flag.
fn caller(opcode: Opcode, l2_gas: u128, da_gas: u128) -> Vec<Instruction> {
	caller_with_args(opcode, l2_gas, da_gas, 0)
}

/// Same as `caller`, passing `args_size` cells from offset 104 as calldata.
fn caller_with_args(opcode: Opcode, l2_gas: u128, da_gas: u128, args_size: u128) -> Vec<Instruction> {
	vec![
		set(Tag::Uint32, 100, l2_gas),
		set(Tag::Uint32, 101, da_gas),
		set(Tag::Field, 102, CALLEE as u128),
		set(Tag::Uint32, 103, args_size),
		call(opcode, 100, 101, 102, 103, 104),
		single(Opcode::SuccessCopy, 110),
		single(Opcode::ReturndataSize, 111),
		triple(Opcode::ReturndataCopy, 103, 111, 120),
		pair(Opcode::Mov16, 110, 121),
		set(Tag::Uint32, 114, 2),
		ret(120, 114),
	]
}

fn host_with_callee(callee: Vec<Instruction>) -> InMemoryHost {
	let mut host = InMemoryHost::new();
	host.set_contract(address(CALLEE), program(&callee));
	host
}

#[test]
fn nested_call_returns_data_and_refunds_gas() {
	let (result, host) = run(
		host_with_callee(storing_callee()),
		root_environment(),
		&caller(Opcode::Call, 100_000, 10_000),
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![field(42), field(1)]);
	assert_eq!(host.storage(address(CALLEE), field(7)), field(42));
	// Caller: 8 cheap instructions, CALL, RETURNDATACOPY of one element and
	// RETURN of two. Callee: 4 cheap instructions, SSTORE and RETURN of one.
	let caller_l2 = 8 * 9 + 3000 + (27 + 3) + (9 + 6);
	let callee_l2 = 4 * 9 + 1657 + 3;
	assert_eq!(
		result.gas_left,
		Gas::new(GAS.l2_gas - caller_l2 - callee_l2, GAS.da_gas - 1024)
	);
}

#[test]
fn reverted_nested_call_discards_its_writes() {
	let (result, host) = run(
		host_with_callee(reverting_callee()),
		root_environment(),
		&caller(Opcode::Call, 100_000, 10_000),
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![field(42), FieldElement::zero()]);
	assert_eq!(host.storage(address(CALLEE), field(7)), FieldElement::zero());
	assert_eq!(host.depth(), 0);
}

#[test]
fn static_call_cannot_modify_state() {
	let (result, host) = run(
		host_with_callee(storing_callee()),
		root_environment(),
		&caller(Opcode::StaticCall, 100_000, 10_000),
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![FieldElement::zero(), FieldElement::zero()]);
	assert_eq!(host.storage(address(CALLEE), field(7)), FieldElement::zero());
}

#[test]
fn callee_running_out_of_gas_keeps_nothing() {
	let (result, _) = run(
		host_with_callee(storing_callee()),
		root_environment(),
		&caller(Opcode::Call, 1_000, 10_000),
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![FieldElement::zero(), FieldElement::zero()]);
	// The callee's whole allocation is gone.
	let caller_l2 = 8 * 9 + 3000 + 27 + (9 + 6);
	assert_eq!(
		result.gas_left,
		Gas::new(GAS.l2_gas - caller_l2 - 1_000, GAS.da_gas - 10_000)
	);
}

#[test]
fn failed_call_is_part_of_the_revert_reason() {
	let mut instructions = caller(Opcode::StaticCall, 100_000, 10_000);
	instructions.pop();
	instructions.push(revert(120, 103));
	let (result, _) = run(host_with_callee(storing_callee()), root_environment(), &instructions);

	assert!(result.reverted);
	let reason = result.revert_reason.unwrap();
	assert_eq!(reason.error, ExitError::Reverted);
	assert_eq!(reason.depth, 0);
	let nested = reason.nested.unwrap();
	assert_eq!(
		nested.error,
		ExitError::Exception(ExitException::StaticCallAlteration)
	);
	assert_eq!(nested.address, address(CALLEE));
	assert_eq!(nested.depth, 1);
	assert_eq!(nested.pc, Some(2));
}

#[test]
fn calling_a_missing_contract_fails_the_call() {
	let (result, _) = run(
		InMemoryHost::new(),
		root_environment(),
		&caller(Opcode::Call, 100_000, 10_000),
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![FieldElement::zero(), FieldElement::zero()]);
}

#[test]
fn call_depth_is_limited() {
	let config = Config {
		call_depth_limit: 0,
		..Config::standard()
	};
	let mut executor = Executor::new(host_with_callee(storing_callee()), &config);
	let result = executor.execute_bytecode(
		&program(&caller(Opcode::Call, 100_000, 10_000)),
		root_environment(),
		GAS,
	);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![FieldElement::zero(), FieldElement::zero()]);
	// Nothing ran, so the whole allocation came back.
	let caller_l2 = 8 * 9 + 3000 + 27 + (9 + 6);
	assert_eq!(result.gas_left, Gas::new(GAS.l2_gas - caller_l2, GAS.da_gas));
	assert_eq!(
		executor.host().storage(address(CALLEE), field(7)),
		FieldElement::zero()
	);
}

#[test]
fn execute_loads_the_contract_from_the_host() {
	let mut executor = Executor::new(host_with_callee(storing_callee()), &CONFIG);
	let environment = avm::ExecutionEnvironment::new(address(CALLEE), address(1), Vec::new());
	let result = executor.execute(environment, GAS);

	assert!(!result.reverted);
	assert_eq!(result.output, vec![field(42)]);
}

#[test]
fn call_arguments_are_charged_per_element() {
	let gas_left = |args_size| {
		let (result, _) = run(
			InMemoryHost::new(),
			root_environment(),
			&caller_with_args(Opcode::Call, 100_000, 10_000, args_size),
		);
		assert!(!result.reverted);
		result.gas_left
	};

	let without_args = gas_left(0);
	let with_args = gas_left(10);
	assert_eq!(without_args.l2_gas - with_args.l2_gas, 10 * 3);
	assert_eq!(without_args.da_gas, with_args.da_gas);
}

#[test]
fn oversized_call_arguments_run_out_of_gas() {
	for args_size in [20_000_000, u32::MAX as u128] {
		let (result, _) = run(
			host_with_callee(storing_callee()),
			root_environment(),
			&caller_with_args(Opcode::Call, 100_000, 10_000, args_size),
		);

		assert!(result.reverted);
		assert_eq!(result.gas_left, Gas::zero());
		let reason = result.revert_reason.unwrap();
		assert_eq!(reason.error, ExitError::Exception(ExitException::OutOfGas));
		assert_eq!(reason.pc, Some(4));
		assert!(reason.nested.is_none());
	}
}

#[test]
fn exception_after_a_failed_call_does_not_blame_it() {
	let (result, _) = run(
		InMemoryHost::new(),
		root_environment(),
		&[
			set(Tag::Uint32, 100, 100_000),
			set(Tag::Uint32, 101, 10_000),
			set(Tag::Field, 102, 77),
			set(Tag::Uint32, 103, 0),
			call(Opcode::Call, 100, 101, 102, 103, 104),
			set(Tag::Uint32, 1, 7),
			set(Tag::Uint32, 2, 0),
			set(Tag::Uint32, 3, 1),
			binary(Opcode::Div16, AddressingMode::DIRECT, Tag::Uint32, 1, 2, 4),
		],
	);

	assert!(result.reverted);
	let reason = result.revert_reason.unwrap();
	assert_eq!(reason.error, ExitError::Exception(ExitException::DivisionByZero));
	assert_eq!(reason.pc, Some(8));
	assert!(reason.nested.is_none());
}

#[test]
fn exception_right_after_a_failed_call_keeps_it() {
	// The program ends with the call, so the failure is running off the end.
	let mut instructions = caller(Opcode::Call, 100_000, 10_000);
	instructions.truncate(5);
	let (result, _) = run(InMemoryHost::new(), root_environment(), &instructions);

	assert!(result.reverted);
	let reason = result.revert_reason.unwrap();
	assert_eq!(
		reason.error,
		ExitError::Exception(ExitException::PcOutOfRange(5))
	);
	let nested = reason.nested.unwrap();
	assert_eq!(nested.address, address(CALLEE));
	assert!(matches!(
		nested.error,
		ExitError::Exception(ExitException::Host(_))
	));
}
