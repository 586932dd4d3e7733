//! Supported chains and their proof-of-work limits.

use compact::Compact;
use uint::U256;

// 2^224 - 1, little-endian u64 limbs
const MAX_BITS_MAINNET: U256 = U256([
	0xffffffffffffffff,
	0xffffffffffffffff,
	0xffffffffffffffff,
	0x00000000ffffffff,
]);
const MAX_BITS_TESTNET: U256 = U256([
	0xffffffffffffffff,
	0xffffffffffffffff,
	0xffffffffffffffff,
	0x00000000ffffffff,
]);
// 2^255 - 1
const MAX_BITS_REGTEST: U256 = U256([
	0xffffffffffffffff,
	0xffffffffffffffff,
	0xffffffffffffffff,
	0x7fffffffffffffff,
]);

/// Network the consensus engine runs on.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Network {
	/// The production network.
	Mainnet,
	/// The public test network.
	Testnet,
	/// Local regression test network.
	Regtest,
	/// Network for unit tests, proof of work difficulty is almost 0.
	Unitest,
}

impl Network {
	pub fn max_bits(&self) -> U256 {
		match *self {
			Network::Mainnet => MAX_BITS_MAINNET,
			Network::Testnet => MAX_BITS_TESTNET,
			Network::Regtest => MAX_BITS_REGTEST,
			Network::Unitest => Compact::max_value().into(),
		}
	}

	/// Default (and minimum) height of the hard-fork trigger on this network.
	pub fn default_fork_height(&self) -> u32 {
		match *self {
			Network::Mainnet => 666_666,
			Network::Testnet => 1_000_000,
			Network::Regtest | Network::Unitest => 100,
		}
	}
}

#[cfg(test)]
mod tests {
	use compact::Compact;
	use uint::U256;
	use super::Network;

	#[test]
	fn test_network_max_bits() {
		assert_eq!(Network::Mainnet.max_bits(), Network::Testnet.max_bits());
		assert!(Network::Regtest.max_bits() > Network::Mainnet.max_bits());

		// limits re-encode to the canonical compact forms
		assert_eq!(Compact::from_u256(Network::Mainnet.max_bits()), Compact::new(0x1d00ffff));
		assert_eq!(Compact::from_u256(Network::Regtest.max_bits()), Compact::new(0x207fffff));
	}

	#[test]
	fn test_network_max_bits_limbs() {
		assert_eq!(Network::Mainnet.max_bits(), (!U256::zero()) >> 32);
		assert_eq!(Network::Regtest.max_bits(), (!U256::zero()) >> 1);
	}

	#[test]
	fn test_network_default_fork_height() {
		assert!(Network::Regtest.default_fork_height() < Network::Mainnet.default_fork_height());
	}
}
