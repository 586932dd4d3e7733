//! Big unsigned integer types.

construct_uint! {
	/// 256-bit unsigned integer.
	pub struct U256(4);
}

#[cfg(test)]
mod tests {
	use super::U256;

	#[test]
	fn test_u256_const_limbs() {
		// limbs are little-endian u64 words
		let max = U256([!0u64; 4]);
		assert_eq!(max, !U256::zero());
		assert_eq!(U256([1, 0, 0, 0]), U256::from(1u64));
	}

	#[test]
	fn test_u256_overflowing_mul() {
		let (_, overflow) = (!U256::zero()).overflowing_mul(U256::from(2u64));
		assert!(overflow);

		let (product, overflow) = U256::from(3u64).overflowing_mul(U256::from(4u64));
		assert!(!overflow);
		assert_eq!(product, U256::from(12u64));
	}
}
