//! Compact representation of `U256`

use std::fmt;
use uint::U256;

/// Error computing difficulty out of a compact value.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Error {
	/// Mantissa of the compact value is zero, so the difficulty ratio is a division by zero.
	ZeroMantissa,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::ZeroMantissa => write!(f, "compact value has zero mantissa"),
		}
	}
}

/// Compact representation of `U256`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Compact(u32);

impl From<u32> for Compact {
	fn from(u: u32) -> Self {
		Compact(u)
	}
}

impl From<Compact> for u32 {
	fn from(c: Compact) -> Self {
		c.0
	}
}

impl From<U256> for Compact {
	fn from(u: U256) -> Self {
		Compact::from_u256(u)
	}
}

impl From<Compact> for U256 {
	fn from(c: Compact) -> Self {
		// ignore overflows and negative values
		c.to_u256().unwrap_or_else(|x| x)
	}
}

impl fmt::Display for Compact {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:#010x}", self.0)
	}
}

impl Compact {
	pub fn new(u: u32) -> Self {
		Compact(u)
	}

	pub fn max_value() -> Self {
		U256::max_value().into()
	}

	/// Computes the target [0, T] that a blockhash must land in to be valid
	/// Returns value in error, if there is an overflow or its negative value
	pub fn to_u256(&self) -> Result<U256, U256> {
		let size = self.0 >> 24;
		let mut word = self.0 & 0x007fffff;

		let result = if size <= 3 {
			word >>= 8 * (3 - size as usize);
			word.into()
		} else {
			U256::from(word) << (8 * (size as usize - 3))
		};

		let is_negative = word != 0 && (self.0 & 0x00800000) != 0;
		let is_overflow = (word != 0 && size > 34) ||
				(word > 0xff && size > 33) ||
				(word > 0xffff && size > 32);

		if is_negative || is_overflow {
			Err(result)
		} else {
			Ok(result)
		}
	}

	pub fn from_u256(val: U256) -> Self {
		let mut size = (val.bits() + 7) / 8;
		let mut compact = if size <= 3 {
			(val.low_u64() << (8 * (3 - size))) as u32
		} else {
			let bn = val >> (8 * (size - 3));
			bn.low_u32()
		};

		if (compact & 0x00800000) != 0 {
			compact >>= 8;
			size += 1;
		}

		assert!((compact & !0x007fffff) == 0);
		assert!(size < 256);
		Compact(compact | (size << 24) as u32)
	}

	/// Difficulty ratio of the maximum standard target to this compact target.
	///
	/// The mantissa quotient is scaled by 256 once per exponent step away from
	/// the standard exponent 29, the same way the reference scaling loop does it,
	/// so sub-1.0 difficulties on relaxed-limit networks come out exact.
	pub fn to_f64(&self) -> Result<f64, Error> {
		let mantissa = self.0 & 0x00ffffff;
		if mantissa == 0 {
			return Err(Error::ZeroMantissa);
		}

		let mut shift = (self.0 >> 24) & 0xff;
		let mut difficulty = f64::from(0x0000ffff) / f64::from(mantissa);
		while shift < 29 {
			difficulty *= 256.0;
			shift += 1;
		}
		while shift > 29 {
			difficulty /= 256.0;
			shift -= 1;
		}

		Ok(difficulty)
	}
}

#[cfg(test)]
mod tests {
	use uint::U256;
	use super::{Compact, Error};

	#[test]
	fn test_compact_to_u256() {
		assert_eq!(Compact::new(0x01003456).to_u256(), Ok(0u64.into()));
		assert_eq!(Compact::new(0x01123456).to_u256(), Ok(0x12u64.into()));
		assert_eq!(Compact::new(0x02008000).to_u256(), Ok(0x80u64.into()));
		assert_eq!(Compact::new(0x05009234).to_u256(), Ok(0x92340000u64.into()));
		// negative -0x12345600
		assert!(Compact::new(0x04923456).to_u256().is_err());
		assert_eq!(Compact::new(0x04123456).to_u256(), Ok(0x12345600u64.into()));
	}

	#[test]
	fn test_from_u256() {
		let test1 = U256::from(1000u64);
		assert_eq!(Compact::new(0x0203e800), Compact::from_u256(test1));

		let test2 = U256::from(2u64).pow(U256::from(224u64)) - U256::from(1u64);
		assert_eq!(Compact::new(0x1d00ffff), Compact::from_u256(test2));
	}

	#[test]
	fn test_compact_to_from_u256() {
		let compact = Compact::new(0x1d00ffff);
		let compact2 = Compact::from_u256(compact.to_u256().unwrap());
		assert_eq!(compact, compact2);

		let compact = Compact::new(0x05009234);
		let compact2 = Compact::from_u256(compact.to_u256().unwrap());
		assert_eq!(compact, compact2);

		let compact = Compact::new(0x207fffff);
		let compact2 = Compact::from_u256(compact.to_u256().unwrap());
		assert_eq!(compact, compact2);
	}

	#[test]
	fn test_encoder_output_always_round_trips() {
		// every compact value the encoder can emit survives expansion and
		// re-encoding unchanged, across the whole exponent range
		let seeds = [U256::from(1u64), U256::from(0xffu64), U256::from(0xfedcbau64), U256::from(0x7fffffu64)];
		for seed in &seeds {
			let mut target = *seed;
			while !target.is_zero() {
				let compact = Compact::from_u256(target);
				let reexpanded = compact.to_u256().unwrap();
				assert_eq!(Compact::from_u256(reexpanded), compact);
				target = target << 1;
			}
		}
	}

	#[test]
	fn test_reexpansion_approximates_from_below() {
		// compact encoding truncates the low bytes toward zero
		let target = U256::from(0x12345678u64);
		let reexpanded = Compact::from_u256(target).to_u256().unwrap();
		assert!(reexpanded <= target);
		assert_eq!(reexpanded, U256::from(0x12345600u64));
	}

	#[test]
	fn difficulty() {
		assert_eq!(Compact::new(0x1d00ffff).to_f64(), Ok(1.0));

		// lowest standard difficulty of a relaxed-limit test network
		let easiest = Compact::new(0x207fffff).to_f64().unwrap();
		assert!((easiest - 4.656542373906925e-10).abs() < 1e-12);

		let nbits = Compact::new(0x1b0404cb).to_f64().unwrap();
		assert!((nbits - 16307.420938523983).abs() < 1e-8);
	}

	#[test]
	fn difficulty_of_zero_mantissa() {
		assert_eq!(Compact::new(0).to_f64(), Err(Error::ZeroMantissa));
		assert_eq!(Compact::new(0x1d000000).to_f64(), Err(Error::ZeroMantissa));
	}
}
