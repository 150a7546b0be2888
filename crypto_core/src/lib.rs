pub mod block;
pub mod channel;
pub mod hash_sha;
pub mod rand_aes;

pub use crate::{
    block::{Block, BLOCK_LEN},
    hash_sha::ShaHash,
    rand_aes::AesRng,
};

pub use channel::*;
