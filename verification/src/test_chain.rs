//! In-memory header chain backing the consensus tests.

use std::collections::HashMap;
use chain::{BlockHeader, IndexedBlockHeader};
use compact::Compact;
use hash::H256;
use storage::{BlockHeaderProvider, BlockRef};

#[derive(Default)]
pub struct MemoryHeaderProvider {
	by_height: Vec<IndexedBlockHeader>,
	by_hash: HashMap<H256, usize>,
}

impl MemoryHeaderProvider {
	pub fn best(&self) -> IndexedBlockHeader {
		self.by_height.last().cloned().expect("test chain is never empty when queried")
	}

	/// Appends a block with a synthetic hash derived from its height.
	pub fn push(&mut self, version: u32, time: u32, bits: Compact) -> IndexedBlockHeader {
		let height = self.by_height.len() as u32;
		let previous_header_hash = match self.by_height.last() {
			Some(header) => header.hash.clone(),
			None => H256::default(),
		};

		let header = BlockHeader {
			version: version,
			previous_header_hash: previous_header_hash,
			time: time,
			bits: bits,
		};
		let indexed = IndexedBlockHeader::new(test_hash(height), header);

		self.by_hash.insert(indexed.hash.clone(), self.by_height.len());
		self.by_height.push(indexed.clone());
		indexed
	}
}

fn test_hash(height: u32) -> H256 {
	let mut raw = [0u8; 32];
	// tag byte keeps synthetic hashes distinct from the zero genesis parent
	raw[0] = 0xb1;
	raw[28..].copy_from_slice(&height.to_be_bytes());
	raw.into()
}

impl BlockHeaderProvider for MemoryHeaderProvider {
	fn block_header(&self, block_ref: BlockRef) -> Option<IndexedBlockHeader> {
		match block_ref {
			BlockRef::Number(height) => self.by_height.get(height as usize).cloned(),
			BlockRef::Hash(hash) => self.by_hash.get(&hash).and_then(|height| self.by_height.get(*height)).cloned(),
		}
	}
}
