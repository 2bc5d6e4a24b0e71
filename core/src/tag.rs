use core::fmt;

/// Type tag carried by every memory cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tag {
	Field = 0,
	Uint1 = 1,
	Uint8 = 2,
	Uint16 = 3,
	Uint32 = 4,
	Uint64 = 5,
	Uint128 = 6,
}

impl Tag {
	/// All tags, in wire order.
	pub const ALL: [Tag; 7] = [
		Tag::Field,
		Tag::Uint1,
		Tag::Uint8,
		Tag::Uint16,
		Tag::Uint32,
		Tag::Uint64,
		Tag::Uint128,
	];

	/// Parse the wire byte of a `TAG` operand.
	pub const fn from_u8(byte: u8) -> Option<Tag> {
		match byte {
			0 => Some(Tag::Field),
			1 => Some(Tag::Uint1),
			2 => Some(Tag::Uint8),
			3 => Some(Tag::Uint16),
			4 => Some(Tag::Uint32),
			5 => Some(Tag::Uint64),
			6 => Some(Tag::Uint128),
			_ => None,
		}
	}

	pub const fn as_u8(self) -> u8 {
		self as u8
	}

	/// Bit width of an integer tag, `None` for `FIELD`.
	pub const fn bits(self) -> Option<u32> {
		match self {
			Tag::Field => None,
			Tag::Uint1 => Some(1),
			Tag::Uint8 => Some(8),
			Tag::Uint16 => Some(16),
			Tag::Uint32 => Some(32),
			Tag::Uint64 => Some(64),
			Tag::Uint128 => Some(128),
		}
	}

	pub const fn is_integer(self) -> bool {
		!matches!(self, Tag::Field)
	}

	/// Largest value of an integer tag, i.e. `2^n - 1`.
	pub const fn mask(self) -> u128 {
		match self.bits() {
			Some(128) | None => u128::MAX,
			Some(bits) => (1u128 << bits) - 1,
		}
	}

	/// Reduce an integer modulo `2^n`. `FIELD` values below `2^128` are
	/// already canonical, so they pass through.
	pub const fn truncate(self, value: u128) -> u128 {
		value & self.mask()
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Tag::Field => "FIELD",
			Tag::Uint1 => "UINT1",
			Tag::Uint8 => "UINT8",
			Tag::Uint16 => "UINT16",
			Tag::Uint32 => "UINT32",
			Tag::Uint64 => "UINT64",
			Tag::Uint128 => "UINT128",
		};
		f.write_str(name)
	}
}
