#[macro_use]
extern crate uint as uint_crate;
extern crate rustc_hex;

pub mod compact;
pub mod hash;
pub mod uint;
