//! Tagged values and the arithmetic of each memory domain.

use crate::{ExitException, FieldElement, Tag};
use core::fmt;
use primitive_types::U256;

/// Content of one memory cell. The variant is the cell's tag; integer
/// payloads are always canonical for their width.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum MemoryValue {
	U1(u8),
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	U128(u128),
	Field(FieldElement),
}

impl Default for MemoryValue {
	fn default() -> Self {
		MemoryValue::Field(FieldElement::zero())
	}
}

macro_rules! int_op {
	( $lhs:expr, $rhs:expr, |$a:ident, $b:ident| $int:expr, |$fa:ident, $fb:ident| $field:expr ) => {
		match ($lhs, $rhs) {
			(MemoryValue::U1($a), MemoryValue::U1($b)) => Ok(MemoryValue::U1(($int) & 1)),
			(MemoryValue::U8($a), MemoryValue::U8($b)) => Ok(MemoryValue::U8($int)),
			(MemoryValue::U16($a), MemoryValue::U16($b)) => Ok(MemoryValue::U16($int)),
			(MemoryValue::U32($a), MemoryValue::U32($b)) => Ok(MemoryValue::U32($int)),
			(MemoryValue::U64($a), MemoryValue::U64($b)) => Ok(MemoryValue::U64($int)),
			(MemoryValue::U128($a), MemoryValue::U128($b)) => Ok(MemoryValue::U128($int)),
			(MemoryValue::Field($fa), MemoryValue::Field($fb)) => $field,
			(a, b) => Err(ExitException::TypeMismatch {
				expected: a.tag(),
				found: b.tag(),
			}),
		}
	};
}

macro_rules! int_bitwise {
	( $lhs:expr, $rhs:expr, $op:tt ) => {
		int_op!($lhs, $rhs, |a, b| a $op b, |_a, _b| Err(ExitException::UnsupportedTag(Tag::Field)))
	};
}

impl MemoryValue {
	pub fn tag(&self) -> Tag {
		match self {
			MemoryValue::U1(_) => Tag::Uint1,
			MemoryValue::U8(_) => Tag::Uint8,
			MemoryValue::U16(_) => Tag::Uint16,
			MemoryValue::U32(_) => Tag::Uint32,
			MemoryValue::U64(_) => Tag::Uint64,
			MemoryValue::U128(_) => Tag::Uint128,
			MemoryValue::Field(_) => Tag::Field,
		}
	}

	/// Build a value of `tag` from an integer, truncating it to the tag's
	/// modulus.
	pub fn from_u128(tag: Tag, value: u128) -> Self {
		let value = tag.truncate(value);
		match tag {
			Tag::Uint1 => MemoryValue::U1(value as u8),
			Tag::Uint8 => MemoryValue::U8(value as u8),
			Tag::Uint16 => MemoryValue::U16(value as u16),
			Tag::Uint32 => MemoryValue::U32(value as u32),
			Tag::Uint64 => MemoryValue::U64(value as u64),
			Tag::Uint128 => MemoryValue::U128(value),
			Tag::Field => MemoryValue::Field(FieldElement::from(value)),
		}
	}

	/// Build a value of `tag` from a field element. Integer tags keep the low
	/// bits of the element's canonical representation.
	pub fn from_field(tag: Tag, value: FieldElement) -> Self {
		match tag {
			Tag::Field => MemoryValue::Field(value),
			_ => Self::from_u128(tag, value.low_u128()),
		}
	}

	/// Build a value of `tag` from a 256-bit constant: integer tags truncate,
	/// `FIELD` reduces modulo the prime.
	pub fn from_u256(tag: Tag, value: U256) -> Self {
		match tag {
			Tag::Field => MemoryValue::Field(FieldElement::from(value)),
			_ => Self::from_u128(tag, value.low_u128()),
		}
	}

	pub fn from_bool(value: bool) -> Self {
		MemoryValue::U1(value as u8)
	}

	/// Integer representation. For `FIELD` this is the low 128 bits.
	pub fn to_u128(&self) -> u128 {
		match *self {
			MemoryValue::U1(v) => v as u128,
			MemoryValue::U8(v) => v as u128,
			MemoryValue::U16(v) => v as u128,
			MemoryValue::U32(v) => v as u128,
			MemoryValue::U64(v) => v as u128,
			MemoryValue::U128(v) => v,
			MemoryValue::Field(v) => v.low_u128(),
		}
	}

	pub fn to_field(&self) -> FieldElement {
		match *self {
			MemoryValue::Field(v) => v,
			other => FieldElement::from(other.to_u128()),
		}
	}

	/// Reinterpret the integer representation under another tag.
	pub fn cast(&self, tag: Tag) -> Self {
		match *self {
			MemoryValue::Field(v) => Self::from_field(tag, v),
			other => Self::from_u128(tag, other.to_u128()),
		}
	}

	pub fn is_zero(&self) -> bool {
		match self {
			MemoryValue::Field(v) => v.is_zero(),
			other => other.to_u128() == 0,
		}
	}

	pub fn add(&self, other: &Self) -> Result<Self, ExitException> {
		int_op!(*self, *other, |a, b| a.wrapping_add(b), |a, b| Ok(MemoryValue::Field(a + b)))
	}

	pub fn sub(&self, other: &Self) -> Result<Self, ExitException> {
		int_op!(*self, *other, |a, b| a.wrapping_sub(b), |a, b| Ok(MemoryValue::Field(a - b)))
	}

	pub fn mul(&self, other: &Self) -> Result<Self, ExitException> {
		int_op!(*self, *other, |a, b| a.wrapping_mul(b), |a, b| Ok(MemoryValue::Field(a * b)))
	}

	/// Integer division truncates; field division multiplies by the inverse.
	pub fn div(&self, other: &Self) -> Result<Self, ExitException> {
		if other.is_zero() && self.tag() == other.tag() {
			return Err(ExitException::DivisionByZero);
		}
		int_op!(*self, *other, |a, b| a / b, |a, b| {
			a.checked_div(&b)
				.map(MemoryValue::Field)
				.ok_or(ExitException::DivisionByZero)
		})
	}

	pub fn equal(&self, other: &Self) -> Result<Self, ExitException> {
		self.compare(other, |ord| ord == core::cmp::Ordering::Equal)
	}

	/// Strict less-than. `FIELD` compares canonical integer values.
	pub fn lt(&self, other: &Self) -> Result<Self, ExitException> {
		self.compare(other, |ord| ord == core::cmp::Ordering::Less)
	}

	pub fn lte(&self, other: &Self) -> Result<Self, ExitException> {
		self.compare(other, |ord| ord != core::cmp::Ordering::Greater)
	}

	fn compare<F: Fn(core::cmp::Ordering) -> bool>(
		&self,
		other: &Self,
		f: F,
	) -> Result<Self, ExitException> {
		if self.tag() != other.tag() {
			return Err(ExitException::TypeMismatch {
				expected: self.tag(),
				found: other.tag(),
			});
		}
		let ordering = match (self, other) {
			(MemoryValue::Field(a), MemoryValue::Field(b)) => a.cmp(b),
			(a, b) => a.to_u128().cmp(&b.to_u128()),
		};
		Ok(Self::from_bool(f(ordering)))
	}

	pub fn and(&self, other: &Self) -> Result<Self, ExitException> {
		int_bitwise!(*self, *other, &)
	}

	pub fn or(&self, other: &Self) -> Result<Self, ExitException> {
		int_bitwise!(*self, *other, |)
	}

	pub fn xor(&self, other: &Self) -> Result<Self, ExitException> {
		int_bitwise!(*self, *other, ^)
	}

	pub fn not(&self) -> Result<Self, ExitException> {
		match self.tag() {
			Tag::Field => Err(ExitException::UnsupportedTag(Tag::Field)),
			tag => Ok(Self::from_u128(tag, !self.to_u128())),
		}
	}

	/// Left shift; shifting by the bit width or more yields zero.
	pub fn shl(&self, other: &Self) -> Result<Self, ExitException> {
		self.shift(other, |value, amount| value.checked_shl(amount).unwrap_or(0))
	}

	pub fn shr(&self, other: &Self) -> Result<Self, ExitException> {
		self.shift(other, |value, amount| value.checked_shr(amount).unwrap_or(0))
	}

	fn shift<F: Fn(u128, u32) -> u128>(&self, other: &Self, f: F) -> Result<Self, ExitException> {
		if self.tag() != other.tag() {
			return Err(ExitException::TypeMismatch {
				expected: self.tag(),
				found: other.tag(),
			});
		}
		let tag = self.tag();
		let bits = tag.bits().ok_or(ExitException::UnsupportedTag(tag))? as u128;
		let amount = other.to_u128();
		if amount >= bits {
			return Ok(Self::from_u128(tag, 0));
		}
		Ok(Self::from_u128(tag, f(self.to_u128(), amount as u32)))
	}
}

impl fmt::Debug for MemoryValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MemoryValue::Field(v) => write!(f, "{}({})", Tag::Field, v),
			other => write!(f, "{}({})", other.tag(), other.to_u128()),
		}
	}
}

impl fmt::Display for MemoryValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn max_of(tag: Tag) -> MemoryValue {
		MemoryValue::from_u128(tag, tag.mask())
	}

	#[test]
	fn integer_wraparound() {
		for tag in Tag::ALL.iter().copied().filter(|t| t.is_integer()) {
			let one = MemoryValue::from_u128(tag, 1);
			let zero = MemoryValue::from_u128(tag, 0);
			assert_eq!(max_of(tag).add(&one), Ok(zero));
			assert_eq!(zero.sub(&one), Ok(max_of(tag)));
		}
		let a = MemoryValue::U8(200);
		let b = MemoryValue::U8(100);
		assert_eq!(a.add(&b), Ok(MemoryValue::U8(44)));
		assert_eq!(a.mul(&b), Ok(MemoryValue::U8((200u32 * 100 % 256) as u8)));
	}

	#[test]
	fn field_wraparound() {
		let max = MemoryValue::Field(FieldElement::zero() - FieldElement::one());
		let one = MemoryValue::Field(FieldElement::one());
		assert_eq!(max.add(&one), Ok(MemoryValue::Field(FieldElement::zero())));
	}

	#[test]
	fn division() {
		assert_eq!(MemoryValue::U32(7).div(&MemoryValue::U32(2)), Ok(MemoryValue::U32(3)));
		for tag in Tag::ALL {
			let a = MemoryValue::from_u128(tag, 1);
			let zero = MemoryValue::from_u128(tag, 0);
			assert_eq!(a.div(&zero), Err(ExitException::DivisionByZero));
		}
		let a = MemoryValue::Field(FieldElement::from(10u64));
		let b = MemoryValue::Field(FieldElement::from(4u64));
		let q = a.div(&b).unwrap();
		assert_eq!(q.mul(&b), Ok(a));
	}

	#[test]
	fn mismatched_tags() {
		let err = MemoryValue::U8(1).add(&MemoryValue::U16(1));
		assert_eq!(
			err,
			Err(ExitException::TypeMismatch {
				expected: Tag::Uint8,
				found: Tag::Uint16
			})
		);
		assert!(MemoryValue::U8(1).lt(&MemoryValue::Field(FieldElement::one())).is_err());
	}

	#[test]
	fn comparisons() {
		let a = MemoryValue::U64(3);
		let b = MemoryValue::U64(5);
		assert_eq!(a.lt(&b), Ok(MemoryValue::U1(1)));
		assert_eq!(b.lte(&b), Ok(MemoryValue::U1(1)));
		assert_eq!(b.equal(&a), Ok(MemoryValue::U1(0)));
		let max = MemoryValue::Field(FieldElement::zero() - FieldElement::one());
		let one = MemoryValue::Field(FieldElement::one());
		assert_eq!(one.lt(&max), Ok(MemoryValue::U1(1)));
	}

	#[test]
	fn bitwise_and_shifts() {
		assert_eq!(MemoryValue::U8(0b1100).and(&MemoryValue::U8(0b1010)), Ok(MemoryValue::U8(0b1000)));
		assert_eq!(MemoryValue::U8(0b1100).xor(&MemoryValue::U8(0b1010)), Ok(MemoryValue::U8(0b0110)));
		assert_eq!(MemoryValue::U16(0).not(), Ok(MemoryValue::U16(u16::MAX)));
		assert_eq!(MemoryValue::U1(1).not(), Ok(MemoryValue::U1(0)));
		assert_eq!(MemoryValue::U8(0x81).shl(&MemoryValue::U8(1)), Ok(MemoryValue::U8(0x02)));
		assert_eq!(MemoryValue::U8(0x81).shr(&MemoryValue::U8(8)), Ok(MemoryValue::U8(0)));
		assert_eq!(MemoryValue::U128(1).shl(&MemoryValue::U128(127)), Ok(MemoryValue::U128(1 << 127)));
		let f = MemoryValue::Field(FieldElement::one());
		assert_eq!(f.and(&f), Err(ExitException::UnsupportedTag(Tag::Field)));
		assert_eq!(f.not(), Err(ExitException::UnsupportedTag(Tag::Field)));
	}

	#[test]
	fn casts_truncate() {
		assert_eq!(MemoryValue::U32(0x1234).cast(Tag::Uint8), MemoryValue::U8(0x34));
		assert_eq!(MemoryValue::U8(7).cast(Tag::Field), MemoryValue::Field(FieldElement::from(7u64)));
		let big = MemoryValue::Field(FieldElement::zero() - FieldElement::one());
		assert_eq!(big.cast(Tag::Uint1), MemoryValue::from_u128(Tag::Uint1, big.to_u128()));
		assert_eq!(MemoryValue::from_u256(Tag::Uint16, U256::from(0x1_0005u64)), MemoryValue::U16(5));
	}
}
