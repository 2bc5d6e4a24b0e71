//! Multi-scalar multiplication over the Grumpkin curve.

use super::Control;
use crate::{ExitException, FieldElement, Frame, MemoryValue, Opcode, Resolved, Tag};
use alloc::vec::Vec;
use ark_ec::CurveGroup;
use ark_ff::{PrimeField, Zero};
use ark_grumpkin::{Affine, Fr as Scalar, Projective};

/// A curve point as stored in memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Point {
	pub x: FieldElement,
	pub y: FieldElement,
	pub is_infinite: bool,
}

impl Point {
	pub fn infinity() -> Self {
		Self {
			x: FieldElement::zero(),
			y: FieldElement::zero(),
			is_infinite: true,
		}
	}

	fn to_affine(self) -> Result<Affine, ExitException> {
		if self.is_infinite {
			return Ok(Affine::identity());
		}
		let point = Affine::new_unchecked(self.x.into_inner(), self.y.into_inner());
		if !point.is_on_curve() {
			return Err(ExitException::PointNotOnCurve);
		}
		Ok(point)
	}

	fn from_affine(point: Affine) -> Self {
		if point.infinity {
			Self::infinity()
		} else {
			Self {
				x: FieldElement::from_inner(point.x),
				y: FieldElement::from_inner(point.y),
				is_infinite: false,
			}
		}
	}
}

/// A scalar split into two 128-bit limbs, `lo + hi * 2^128`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarLimbs {
	pub lo: FieldElement,
	pub hi: FieldElement,
}

impl ScalarLimbs {
	fn to_scalar(self) -> Result<Scalar, ExitException> {
		if !self.lo.fits_u128() || !self.hi.fits_u128() {
			return Err(ExitException::ScalarLimbTooLarge);
		}
		let mut bytes = [0u8; 32];
		bytes[..16].copy_from_slice(&self.lo.low_u128().to_le_bytes());
		bytes[16..].copy_from_slice(&self.hi.low_u128().to_le_bytes());
		Ok(Scalar::from_le_bytes_mod_order(&bytes))
	}
}

/// Weighted sum of `points`. Every finite point must be on the curve and
/// every scalar limb must fit in 128 bits.
pub fn msm(points: &[Point], scalars: &[ScalarLimbs]) -> Result<Point, ExitException> {
	let points = points
		.iter()
		.map(|point| point.to_affine())
		.collect::<Result<Vec<_>, _>>()?;
	let scalars = scalars
		.iter()
		.map(|scalar| scalar.to_scalar())
		.collect::<Result<Vec<_>, _>>()?;

	let mut acc = Projective::zero();
	for (point, scalar) in points.iter().zip(scalars.iter()) {
		acc += *point * *scalar;
	}
	Ok(Point::from_affine(acc.into_affine()))
}

/// Operands: points, scalars, output, points length. Points are
/// `x, y, is_infinite` triplets, scalars `lo, hi` pairs.
pub fn eval(frame: &mut Frame, resolved: &Resolved) -> Control {
	let (points_offset, scalars_offset, output_offset, length_offset) =
		(resolved[0], resolved[1], resolved[2], resolved[3]);

	let length = try_or_fail!(frame.memory.get_u32(length_offset));
	if length % 3 != 0 {
		return Control::Exit(ExitException::PointsLength(length).into());
	}
	let count = length / 3;
	try_or_fail!(frame.gasometer.record_dynamic(Opcode::Msm, count));

	let raw_points = try_or_fail!(frame.memory.get_slice(points_offset, length));
	let raw_scalars = try_or_fail!(frame.memory.get_slice(
		scalars_offset,
		try_or_fail!(count.checked_mul(2).ok_or(ExitException::AddressOutOfRange)),
	));

	let mut points = Vec::with_capacity(count as usize);
	for triplet in raw_points.chunks(3) {
		try_or_fail!(check_tag(&triplet[0], Tag::Field));
		try_or_fail!(check_tag(&triplet[1], Tag::Field));
		try_or_fail!(check_tag(&triplet[2], Tag::Uint1));
		points.push(Point {
			x: triplet[0].to_field(),
			y: triplet[1].to_field(),
			is_infinite: !triplet[2].is_zero(),
		});
	}
	let mut scalars = Vec::with_capacity(count as usize);
	for pair in raw_scalars.chunks(2) {
		try_or_fail!(check_tag(&pair[0], Tag::Field));
		try_or_fail!(check_tag(&pair[1], Tag::Field));
		scalars.push(ScalarLimbs {
			lo: pair[0].to_field(),
			hi: pair[1].to_field(),
		});
	}

	let result = try_or_fail!(msm(&points, &scalars));
	try_or_fail!(frame.memory.set_slice(
		output_offset,
		&[
			MemoryValue::Field(result.x),
			MemoryValue::Field(result.y),
			MemoryValue::from_bool(result.is_infinite),
		],
	));
	Control::Continue
}

fn check_tag(value: &MemoryValue, expected: Tag) -> Result<(), ExitException> {
	if value.tag() != expected {
		return Err(ExitException::TypeMismatch {
			expected,
			found: value.tag(),
		});
	}
	Ok(())
}
