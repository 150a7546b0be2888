//! Tweakable hash used to encrypt garbled rows and decoding entries.
//!
//! The hash is SHA-256 over a fixed-length encoding of the inputs, truncated
//! to one `Block`: `H(k_1 || ... || k_n || domain || tweak)`, where every key is
//! 16 bytes and the tweak is a little-endian `u64`.

use crate::block::{Block, BLOCK_LEN};
use sha2::{Digest, Sha256};

/// Domain separator for output decoding entries.
pub const OUTPUT_DOMAIN: &[u8] = b"out";

pub struct ShaHash;

impl ShaHash {
    /// Hash `keys`, a domain separator and a numeric tweak into one block.
    #[inline]
    pub fn tweak_hash(keys: &[Block], domain: &[u8], tweak: u64) -> Block {
        let mut hasher = Sha256::new();
        for key in keys {
            hasher.update(key.as_ref());
        }
        hasher.update(domain);
        hasher.update(tweak.to_le_bytes());

        let digest = hasher.finalize();
        let mut res = [0u8; BLOCK_LEN];
        res.copy_from_slice(&digest[..BLOCK_LEN]);
        Block::from(res)
    }

    /// Row key of a two-input gate.
    #[inline]
    pub fn gate_hash2(a: Block, b: Block, gate_id: usize) -> Block {
        Self::tweak_hash(&[a, b], &[], gate_id as u64)
    }

    /// Row key of a one-input gate.
    #[inline]
    pub fn gate_hash1(a: Block, gate_id: usize) -> Block {
        Self::tweak_hash(&[a], &[], gate_id as u64)
    }

    /// Key of the decoding entry for output wire `wire`.
    #[inline]
    pub fn output_hash(k: Block, wire: usize) -> Block {
        Self::tweak_hash(&[k], OUTPUT_DOMAIN, wire as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_from_hex(s: &str) -> Block {
        let bytes = hex::decode(s).unwrap();
        Block::try_from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_known_answers() {
        assert_eq!(
            ShaHash::output_hash(Block::from(1u128), 7),
            block_from_hex("244d21ad07352675d5eb6eae54eb7fb2")
        );
        assert_eq!(
            ShaHash::gate_hash2(Block::from(2u128), Block::from(3u128), 0),
            block_from_hex("97bb03227565a891df5fd641ac0b20dd")
        );
    }

    #[test]
    fn test_tweak_separates() {
        let k = rand::random::<Block>();
        assert_ne!(ShaHash::gate_hash1(k, 0), ShaHash::gate_hash1(k, 1));
        assert_ne!(ShaHash::gate_hash1(k, 3), ShaHash::output_hash(k, 3));
    }
}
