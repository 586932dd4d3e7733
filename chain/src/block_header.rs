use std::fmt;
use hash::H256;
use compact::Compact;

/// The part of a block header the consensus engine consumes.
///
/// The host node owns full header serialization and hashing; only the fields
/// that drive retargeting and fork triggering are carried here.
#[derive(PartialEq, Clone)]
pub struct BlockHeader {
	pub version: u32,
	pub previous_header_hash: H256,
	pub time: u32,
	pub bits: Compact,
}

impl fmt::Debug for BlockHeader {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("BlockHeader")
			.field("version", &self.version)
			.field("previous_header_hash", &self.previous_header_hash.reversed())
			.field("time", &self.time)
			.field("bits", &self.bits)
			.finish()
	}
}
