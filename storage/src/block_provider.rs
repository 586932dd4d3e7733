use chain::IndexedBlockHeader;
use {BlockRef};

/// Read access to the connected header chain.
///
/// The host node implements this over its own database; the consensus engine
/// only ever reads headers that are already connected, so `None` means the
/// reference is past the tip or off the known chain.
pub trait BlockHeaderProvider {
	/// resolves header by block reference (number/hash)
	fn block_header(&self, block_ref: BlockRef) -> Option<IndexedBlockHeader>;
}
