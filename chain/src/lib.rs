extern crate primitives;

mod block_header;
mod indexed_header;

pub use primitives::{hash, compact, uint};

pub use block_header::BlockHeader;
pub use indexed_header::IndexedBlockHeader;
