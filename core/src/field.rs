use alloc::vec::Vec;
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use primitive_types::U256;

/// Native prime field of the machine (the BN254 scalar field, which is also
/// the base field of the Grumpkin curve).
pub type Fr = ark_grumpkin::Fq;

/// Element of the `FIELD` memory domain.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
	/// Number of bytes in the big-endian encoding of an element.
	pub const BYTES: usize = 32;

	pub fn zero() -> Self {
		Self(Fr::zero())
	}

	pub fn one() -> Self {
		Self(Fr::one())
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Wrap a raw arkworks field element.
	pub fn from_inner(inner: Fr) -> Self {
		Self(inner)
	}

	pub fn into_inner(self) -> Fr {
		self.0
	}

	/// Interpret big-endian bytes as an integer and reduce it modulo the prime.
	pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
		Self(Fr::from_be_bytes_mod_order(bytes))
	}

	/// Canonical 32-byte big-endian representation.
	pub fn to_be_bytes(&self) -> Vec<u8> {
		self.0.into_bigint().to_bytes_be()
	}

	/// Low 128 bits of the canonical integer representation.
	pub fn low_u128(&self) -> u128 {
		let limbs = self.0.into_bigint().0;
		(limbs[0] as u128) | ((limbs[1] as u128) << 64)
	}

	/// Whether the canonical integer representation fits in 128 bits.
	pub fn fits_u128(&self) -> bool {
		let limbs = self.0.into_bigint().0;
		limbs[2] == 0 && limbs[3] == 0
	}

	/// Multiply by the modular inverse of `other`. Zero has no inverse.
	pub fn checked_div(&self, other: &Self) -> Option<Self> {
		other.0.inverse().map(|inverse| Self(self.0 * inverse))
	}
}

impl From<u128> for FieldElement {
	fn from(value: u128) -> Self {
		Self(Fr::from(value))
	}
}

impl From<u64> for FieldElement {
	fn from(value: u64) -> Self {
		Self(Fr::from(value))
	}
}

impl From<u32> for FieldElement {
	fn from(value: u32) -> Self {
		Self(Fr::from(value))
	}
}

impl From<bool> for FieldElement {
	fn from(value: bool) -> Self {
		Self(Fr::from(value))
	}
}

impl From<U256> for FieldElement {
	fn from(value: U256) -> Self {
		let mut bytes = [0u8; 32];
		value.to_big_endian(&mut bytes);
		Self::from_be_bytes_mod_order(&bytes)
	}
}

impl From<FieldElement> for U256 {
	fn from(value: FieldElement) -> Self {
		U256::from_big_endian(&value.to_be_bytes())
	}
}

impl Add for FieldElement {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self(self.0 + rhs.0)
	}
}

impl Sub for FieldElement {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self(self.0 - rhs.0)
	}
}

impl Mul for FieldElement {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self(self.0 * rhs.0)
	}
}

impl Neg for FieldElement {
	type Output = Self;

	fn neg(self) -> Self {
		Self(-self.0)
	}
}

impl fmt::LowerHex for FieldElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let bytes = self.to_be_bytes();
		let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
		if f.alternate() {
			write!(f, "0x")?;
		}
		write!(f, "{:x}", bytes[start])?;
		for byte in &bytes[start + 1..] {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

impl fmt::Debug for FieldElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#x}", self)
	}
}

impl fmt::Display for FieldElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#x}", self)
	}
}
