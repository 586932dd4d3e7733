//! Fixed-size hashes

use std::{str, fmt, ops};
use rustc_hex::{ToHex, FromHex, FromHexError};

/// 32-byte block hash.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256([u8; 32]);

impl H256 {
	pub fn take(self) -> [u8; 32] {
		self.0
	}

	pub fn reversed(&self) -> Self {
		let mut result = *self;
		result.0.reverse();
		result
	}

	pub fn from_reversed_str(s: &'static str) -> Self {
		let hash: H256 = s.parse().expect("hardcoded hash should be valid hex");
		hash.reversed()
	}
}

impl From<[u8; 32]> for H256 {
	fn from(h: [u8; 32]) -> Self {
		H256(h)
	}
}

impl From<H256> for [u8; 32] {
	fn from(h: H256) -> Self {
		h.0
	}
}

impl<'a> From<&'a [u8]> for H256 {
	fn from(slc: &[u8]) -> Self {
		let mut inner = [0u8; 32];
		inner[..].clone_from_slice(&slc[0..32]);
		H256(inner)
	}
}

impl From<u8> for H256 {
	fn from(v: u8) -> Self {
		let mut result = Self::default();
		result.0[0] = v;
		result
	}
}

impl str::FromStr for H256 {
	type Err = FromHexError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let vec: Vec<u8> = s.from_hex()?;
		match vec.len() {
			32 => {
				let mut result = [0u8; 32];
				result.copy_from_slice(&vec);
				Ok(H256(result))
			},
			_ => Err(FromHexError::InvalidHexLength),
		}
	}
}

impl fmt::Debug for H256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

impl fmt::Display for H256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

impl ops::Deref for H256 {
	type Target = [u8; 32];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl ops::DerefMut for H256 {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;
	use super::H256;

	#[test]
	fn test_hash_from_str() {
		let hash = H256::from_str("0000000000000000000000000000000000000000000000000000000000000001");
		assert_eq!(hash.unwrap().take()[31], 1);
		assert!(H256::from_str("0badc0de").is_err());
	}

	#[test]
	fn test_hash_reversed() {
		let hash: H256 = [1u8; 32].into();
		assert_eq!(hash.reversed(), hash);

		let mut raw = [0u8; 32];
		raw[0] = 0xab;
		let hash: H256 = raw.into();
		assert_eq!(hash.reversed().take()[31], 0xab);
	}

	#[test]
	fn test_hash_debug() {
		let hash: H256 = [0u8; 32].into();
		assert_eq!(format!("{:?}", hash), "0".repeat(64));
	}
}
