use avm::{decode, encode, DecodeError, Instruction, InstructionSet, Opcode, Operand, OperandType, Tag, U256};

/// An instance of `opcode` with every operand set to a non-trivial value.
fn sample(opcode: Opcode) -> Instruction {
	let operands = opcode
		.wire_format()
		.operands
		.iter()
		.enumerate()
		.map(|(i, ty)| match ty {
			OperandType::U8 => Operand::U8(i as u8 + 1),
			OperandType::U16 => Operand::U16(0x0100 + i as u16),
			OperandType::U32 => Operand::U32(0x0102_0304),
			OperandType::U64 => Operand::U64(u64::MAX - 1),
			OperandType::U128 => Operand::U128(u128::MAX / 3),
			OperandType::Tag => Operand::Tag(Tag::Uint64),
			OperandType::Field => Operand::Field(U256::from(u128::MAX) + U256::from(0xdead_beefu64)),
		})
		.collect();
	Instruction::new(opcode, operands).unwrap()
}

#[test]
fn every_opcode_round_trips() {
	let all = InstructionSet::all();
	for opcode in Opcode::ALL {
		let instruction = sample(opcode);
		let bytes = encode(&[instruction.clone()]);
		assert_eq!(bytes.len(), instruction.size(), "{}", opcode);
		assert_eq!(bytes[0], opcode as u8);
		let decoded = decode(&bytes, &all).unwrap();
		assert_eq!(decoded, vec![instruction]);
		assert_eq!(encode(&decoded), bytes);
	}
}

#[test]
fn every_strict_prefix_fails_to_parse() {
	let all = InstructionSet::all();
	for opcode in Opcode::ALL {
		let bytes = encode(&[sample(opcode)]);
		for len in 1..bytes.len() {
			assert!(
				matches!(
					decode(&bytes[..len], &all),
					Err(DecodeError::ParsingError { .. })
				),
				"{} prefix {}",
				opcode,
				len
			);
		}
	}
}

#[test]
fn program_decodes_in_order() {
	let program = vec![sample(Opcode::Set8), sample(Opcode::Add16), sample(Opcode::Return)];
	let bytes = encode(&program);
	assert_eq!(decode(&bytes, &InstructionSet::all()), Ok(program));
}

#[test]
fn empty_program() {
	assert_eq!(decode(&[], &InstructionSet::all()), Ok(Vec::new()));
}

#[test]
fn set_8_wire_bytes() {
	let bytes = hex::decode("25000402ff").unwrap();
	let decoded = decode(&bytes, &InstructionSet::all()).unwrap();
	assert_eq!(
		decoded,
		vec![Instruction::new(
			Opcode::Set8,
			vec![Operand::U8(0), Operand::Tag(Tag::Uint32), Operand::U8(2), Operand::U8(0xff)],
		)
		.unwrap()]
	);
	assert_eq!(decoded[0].to_string(), "SET_8 0 UINT32 2 255");
}

#[test]
fn disabled_opcode_is_invalid() {
	let set = InstructionSet::all().without(Opcode::Msm);
	let bytes = encode(&[sample(Opcode::Msm)]);
	assert_eq!(
		decode(&bytes, &set),
		Err(DecodeError::InvalidOpcode {
			position: 0,
			byte: Opcode::Msm as u8,
		})
	);
}

#[test]
fn mismatched_operands_are_rejected() {
	assert_eq!(
		Instruction::new(Opcode::Jump32, vec![Operand::U16(1)]),
		Err(DecodeError::OperandMismatch { opcode: Opcode::Jump32 })
	);
}
