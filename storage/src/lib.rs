extern crate chain;
extern crate primitives;

mod block_ancestors;
mod block_iterator;
mod block_provider;
mod block_ref;

pub use primitives::hash;

pub use block_ancestors::BlockAncestors;
pub use block_iterator::BlockIterator;
pub use block_provider::BlockHeaderProvider;
pub use block_ref::BlockRef;
