//! A 128-bit value used for wire labels, ciphertexts and OT messages.

use core::ops::{BitXor, BitXorAssign};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of bytes in a `Block`.
pub const BLOCK_LEN: usize = 16;

/// A 128-bit block, stored little-endian.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block([u8; BLOCK_LEN]);

impl Block {
    #[inline]
    pub fn new(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a block from a slice; `None` unless the slice is exactly 16 bytes.
    #[inline]
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; BLOCK_LEN] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    #[inline]
    pub fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.0)
    }

    #[inline]
    pub fn lsb(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    #[inline]
    pub fn set_lsb(&self) -> Self {
        let mut b = *self;
        b.0[0] |= 1;
        b
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        self.0
    }
}

impl From<u128> for Block {
    #[inline]
    fn from(x: u128) -> Self {
        Self(x.to_le_bytes())
    }
}

impl From<[u8; BLOCK_LEN]> for Block {
    #[inline]
    fn from(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Block> for u128 {
    #[inline]
    fn from(b: Block) -> u128 {
        b.as_u128()
    }
}

impl From<Block> for [u8; BLOCK_LEN] {
    #[inline]
    fn from(b: Block) -> [u8; BLOCK_LEN] {
        b.0
    }
}

impl AsRef<[u8]> for Block {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Block {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl BitXor for Block {
    type Output = Self;

    #[inline]
    fn bitxor(self, other: Self) -> Self::Output {
        Self::from(self.as_u128() ^ other.as_u128())
    }
}

impl BitXorAssign for Block {
    #[inline]
    fn bitxor_assign(&mut self, other: Self) {
        *self = *self ^ other;
    }
}

impl Distribution<Block> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        Block(rng.gen::<[u8; BLOCK_LEN]>())
    }
}
