//! Cryptographic random number generator based on AES-128 in counter mode.

use crate::Block;
use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use rand_core::block::{BlockRng, BlockRngCore};
use rand_core::{CryptoRng, Error, RngCore, SeedableRng};

/// AES-CTR keystream producing 64 bytes per refill.
#[derive(Clone)]
pub struct AesRngCore {
    aes: Aes128,
    counter: u128,
}

impl BlockRngCore for AesRngCore {
    type Item = u32;
    type Results = [u32; 16];

    #[inline]
    fn generate(&mut self, results: &mut Self::Results) {
        for chunk in results.chunks_exact_mut(4) {
            let mut blk = GenericArray::from(self.counter.to_le_bytes());
            self.counter = self.counter.wrapping_add(1);
            self.aes.encrypt_block(&mut blk);
            for (r, bytes) in chunk.iter_mut().zip(blk.chunks_exact(4)) {
                *r = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
        }
    }
}

impl SeedableRng for AesRngCore {
    type Seed = Block;

    #[inline]
    fn from_seed(seed: Block) -> Self {
        let key: [u8; 16] = seed.into();
        let aes = Aes128::new(&GenericArray::from(key));
        Self { aes, counter: 0 }
    }
}

impl CryptoRng for AesRngCore {}

#[derive(Clone)]
pub struct AesRng(BlockRng<AesRngCore>);

impl AesRng {
    /// New `AesRng` seeded from the thread-local generator.
    #[inline]
    pub fn new() -> Self {
        let seed = rand::random::<Block>();
        Self::from_seed(seed)
    }

    #[inline]
    pub fn gen_block(&mut self) -> Block {
        let mut blk = Block::default();
        self.fill_bytes(blk.as_mut());
        blk
    }

    #[inline]
    pub fn gen_blocks(&mut self, n: usize) -> Vec<Block> {
        (0..n).map(|_| self.gen_block()).collect()
    }
}

impl Default for AesRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for AesRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl SeedableRng for AesRng {
    type Seed = Block;

    #[inline]
    fn from_seed(seed: Block) -> Self {
        AesRng(BlockRng::<AesRngCore>::from_seed(seed))
    }
}

impl CryptoRng for AesRng {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let seed = rand::random::<Block>();
        let mut rng1 = AesRng::from_seed(seed);
        let mut rng2 = AesRng::from_seed(seed);
        assert_eq!(rng1.gen_blocks(10), rng2.gen_blocks(10));
    }

    #[test]
    fn test_blocks_differ() {
        let mut rng = AesRng::new();
        let a = rng.gen_block();
        let b = rng.gen_block();
        assert_ne!(a, b);
    }
}
