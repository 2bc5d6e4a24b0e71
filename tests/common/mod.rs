#![allow(dead_code)]

use avm::backend::InMemoryHost;
use avm::gasometer::Gas;
use avm::{
	encode, AddressingMode, Config, ExecutionEnvironment, ExecutionResult, Executor, FieldElement,
	Instruction, Opcode, Operand, Tag, U256,
};

pub static CONFIG: Config = Config::standard();

pub const GAS: Gas = Gas::new(1_000_000, 100_000);

pub fn address(value: u64) -> FieldElement {
	FieldElement::from(value)
}

pub fn field(value: u64) -> FieldElement {
	FieldElement::from(value)
}

pub fn instruction(opcode: Opcode, operands: Vec<Operand>) -> Instruction {
	Instruction::new(opcode, operands).unwrap()
}

/// `SET_128` of a small constant.
pub fn set(tag: Tag, dst: u16, value: u128) -> Instruction {
	instruction(
		Opcode::Set128,
		vec![Operand::U8(0), Operand::Tag(tag), Operand::U16(dst), Operand::U128(value)],
	)
}

pub fn set_ff(dst: u16, value: U256) -> Instruction {
	instruction(
		Opcode::SetFf,
		vec![Operand::U8(0), Operand::Tag(Tag::Field), Operand::U16(dst), Operand::Field(value)],
	)
}

pub fn binary(opcode: Opcode, mode: AddressingMode, tag: Tag, a: u16, b: u16, dst: u16) -> Instruction {
	instruction(
		opcode,
		vec![
			Operand::U8(mode.0 as u8),
			Operand::Tag(tag),
			Operand::U16(a),
			Operand::U16(b),
			Operand::U16(dst),
		],
	)
}

pub fn add(tag: Tag, a: u16, b: u16, dst: u16) -> Instruction {
	binary(Opcode::Add16, AddressingMode::DIRECT, tag, a, b, dst)
}

/// Two memory operands with a `UINT8` addressing field of zero.
pub fn pair(opcode: Opcode, a: u16, b: u16) -> Instruction {
	instruction(opcode, vec![Operand::U8(0), Operand::U16(a), Operand::U16(b)])
}

pub fn triple(opcode: Opcode, a: u16, b: u16, c: u16) -> Instruction {
	instruction(
		opcode,
		vec![Operand::U8(0), Operand::U16(a), Operand::U16(b), Operand::U16(c)],
	)
}

pub fn single(opcode: Opcode, a: u16) -> Instruction {
	instruction(opcode, vec![Operand::U8(0), Operand::U16(a)])
}

/// `RETURN` of `size_offset` cells starting at `offset`.
pub fn ret(offset: u16, size_offset: u16) -> Instruction {
	pair(Opcode::Return, offset, size_offset)
}

pub fn revert(offset: u16, size_offset: u16) -> Instruction {
	pair(Opcode::Revert16, offset, size_offset)
}

pub fn call(opcode: Opcode, l2_gas: u16, da_gas: u16, address: u16, args_size: u16, args: u16) -> Instruction {
	instruction(
		opcode,
		vec![
			Operand::U16(0),
			Operand::U16(l2_gas),
			Operand::U16(da_gas),
			Operand::U16(address),
			Operand::U16(args_size),
			Operand::U16(args),
		],
	)
}

pub fn program(instructions: &[Instruction]) -> Vec<u8> {
	encode(instructions)
}

pub fn run(host: InMemoryHost, environment: ExecutionEnvironment, instructions: &[Instruction]) -> (ExecutionResult, InMemoryHost) {
	let mut executor = Executor::new(host, &CONFIG);
	let result = executor.execute_bytecode(&program(instructions), environment, GAS);
	(result, executor.into_host())
}

pub fn root_environment() -> ExecutionEnvironment {
	ExecutionEnvironment::new(address(1), address(99), Vec::new())
}
