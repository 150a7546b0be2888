//! Fixed-width integers viewed as LSB-first bit sequences.

use crate::errors::BitIntError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported integer widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::W8, Width::W16, Width::W32, Width::W64];

    #[inline]
    pub fn bits(self) -> usize {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    #[inline]
    fn mask(self) -> u64 {
        match self {
            Width::W64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }
}

impl TryFrom<usize> for Width {
    type Error = BitIntError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            _ => Err(BitIntError::UnsupportedWidth(bits)),
        }
    }
}

/// An integer of a fixed width. The value is kept masked to the width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitInt {
    value: u64,
    width: Width,
}

impl BitInt {
    /// New `BitInt`, truncating `value` to `width` bits.
    #[inline]
    pub fn new(value: u64, width: Width) -> Self {
        Self {
            value: value & width.mask(),
            width,
        }
    }

    /// New `BitInt` from a signed value in two's complement.
    #[inline]
    pub fn from_i64(value: i64, width: Width) -> Self {
        Self::new(value as u64, width)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Two's complement interpretation, sign-extended to 64 bits.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        let shift = 64 - self.width.bits() as u32;
        ((self.value << shift) as i64) >> shift
    }

    /// Bit `i`, least significant first. Bits past the width are zero.
    #[inline]
    pub fn digit(&self, i: usize) -> bool {
        i < self.width.bits() && (self.value >> i) & 1 == 1
    }

    pub fn to_bits(&self) -> Vec<bool> {
        (0..self.width.bits()).map(|i| self.digit(i)).collect()
    }

    /// Pack LSB-first `bits` into an integer of `width`. Missing high bits are zero.
    pub fn from_bits(bits: &[bool], width: Width) -> Result<Self, BitIntError> {
        if bits.len() > width.bits() {
            return Err(BitIntError::TooManyBits {
                bits: bits.len(),
                width: width.bits(),
            });
        }
        let value = bits
            .iter()
            .rev()
            .fold(0u64, |acc, bit| (acc << 1) | (*bit as u64));
        Ok(Self { value, width })
    }
}

impl From<u8> for BitInt {
    fn from(x: u8) -> Self {
        Self::new(x as u64, Width::W8)
    }
}

impl From<u16> for BitInt {
    fn from(x: u16) -> Self {
        Self::new(x as u64, Width::W16)
    }
}

impl From<u32> for BitInt {
    fn from(x: u32) -> Self {
        Self::new(x as u64, Width::W32)
    }
}

impl From<u64> for BitInt {
    fn from(x: u64) -> Self {
        Self::new(x, Width::W64)
    }
}

impl fmt::Display for BitInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Int{}({})", self.width.bits(), self.value)
    }
}
