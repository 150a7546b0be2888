//! Define the wire labels and tables of a point-and-permute garbled circuit.

use crypto_core::Block;
use rand::{CryptoRng, Rng};

/// Bit length of a label key. One key plus its permutation bit fill a `Block`.
pub const KEY_BITS: usize = 127;

const KEY_MASK: u128 = u128::MAX >> (128 - KEY_BITS);

/// The label held for one logical value of one wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLabel {
    /// key, `KEY_BITS` wide
    pub key: Block,
    /// permutation bit
    pub bit: bool,
}

impl WireLabel {
    /// New label; the key is truncated to `KEY_BITS`.
    #[inline]
    pub fn new(key: Block, bit: bool) -> Self {
        Self {
            key: Block::from(key.as_u128() & KEY_MASK),
            bit,
        }
    }

    #[inline]
    pub fn random<R: Rng + CryptoRng>(rng: &mut R, bit: bool) -> Self {
        Self::new(rng.gen::<Block>(), bit)
    }

    /// `key << 1 | bit`
    #[inline]
    pub fn pack(&self) -> Block {
        Block::from((self.key.as_u128() << 1) | self.bit as u128)
    }

    #[inline]
    pub fn unpack(w: Block) -> Self {
        Self {
            key: Block::from(w.as_u128() >> 1),
            bit: w.lsb(),
        }
    }
}

/// The labels of logical 0 and logical 1 of one wire. Only the garbler holds these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPair([WireLabel; 2]);

impl LabelPair {
    /// Fresh pair with distinct keys and complementary permutation bits.
    pub fn random<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let p0 = rng.gen::<bool>();
        let zero = WireLabel::random(rng, p0);
        let mut one = WireLabel::random(rng, !p0);
        while one.key == zero.key {
            one = WireLabel::random(rng, !p0);
        }
        Self([zero, one])
    }

    /// Label of logical value `value`.
    #[inline]
    pub fn select(&self, value: bool) -> WireLabel {
        self.0[value as usize]
    }

    #[inline]
    pub fn zero(&self) -> WireLabel {
        self.0[0]
    }

    #[inline]
    pub fn one(&self) -> WireLabel {
        self.0[1]
    }
}

/// Encrypted rows of one gate, indexed by the permutation bits of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarbledGate {
    /// Indexed by `p_a`.
    Unary([Block; 2]),
    /// Indexed by `p_a << 1 | p_b`.
    Binary([Block; 4]),
}

impl GarbledGate {
    #[inline]
    pub fn rows(&self) -> &[Block] {
        match self {
            GarbledGate::Unary(rows) => rows,
            GarbledGate::Binary(rows) => rows,
        }
    }

    #[inline]
    pub fn rows_mut(&mut self) -> &mut [Block] {
        match self {
            GarbledGate::Unary(rows) => rows,
            GarbledGate::Binary(rows) => rows,
        }
    }
}

/// Garbled rows of every gate, in circuit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarbledTable {
    pub gates: Vec<GarbledGate>,
}

impl GarbledTable {
    pub fn new(gates: Vec<GarbledGate>) -> Self {
        Self { gates }
    }
}

/// Decoding entries of the output wires. Row `j` belongs to wire `offset + j`
/// and is indexed by the permutation bit of the label held for that wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingTable {
    pub offset: usize,
    pub rows: Vec<[Block; 2]>,
}

impl DecodingTable {
    pub fn new(offset: usize, rows: Vec<[Block; 2]>) -> Self {
        Self { offset, rows }
    }
}
