pub mod local_channel;
pub mod net_channel;

pub use local_channel::*;
pub use net_channel::*;

use std::io::{Error, ErrorKind, Read, Result, Write};

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};

use crate::Block;

/// A trait for an ordered, reliable I/O channel between two parties.
pub trait AbstractChannel {
    /// Write bytes slice to the channel.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
    /// Read bytes slice from the channel.
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()>;
    /// Flush the channel.
    fn flush(&mut self) -> Result<()>;

    /// Write a `bool` to the channel.
    #[inline(always)]
    fn write_bool(&mut self, b: bool) -> Result<()> {
        self.write_bytes(&[b as u8])
    }

    /// Read a 'bool' from the channel.
    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool> {
        let mut data = [0u8; 1];
        self.read_bytes(&mut data)?;
        Ok(data[0] != 0)
    }

    /// Write a slice of `bool`s, one byte each.
    #[inline(always)]
    fn write_bools(&mut self, bs: &[bool]) -> Result<()> {
        let bytes: Vec<u8> = bs.iter().map(|b| *b as u8).collect();
        self.write_bytes(&bytes)
    }

    /// Read `n` `bool`s.
    #[inline(always)]
    fn read_bools(&mut self, n: usize) -> Result<Vec<bool>> {
        let mut bytes = vec![0u8; n];
        self.read_bytes(&mut bytes)?;
        Ok(bytes.into_iter().map(|b| b != 0).collect())
    }

    /// Write a `u64` in little-endian order.
    #[inline(always)]
    fn write_u64(&mut self, x: u64) -> Result<()> {
        self.write_bytes(&x.to_le_bytes())
    }

    /// Read a little-endian `u64`.
    #[inline(always)]
    fn read_u64(&mut self) -> Result<u64> {
        let mut data = [0u8; 8];
        self.read_bytes(&mut data)?;
        Ok(u64::from_le_bytes(data))
    }

    /// Write a `Block` to the channel.
    #[inline(always)]
    fn write_block(&mut self, blk: &Block) -> Result<()> {
        self.write_bytes(blk.as_ref())
    }

    /// Read a `Block` from the channel.
    #[inline(always)]
    fn read_block(&mut self) -> Result<Block> {
        let mut blk = Block::default();
        self.read_bytes(blk.as_mut())?;
        Ok(blk)
    }

    /// Write a compressed Ristretto point (32 bytes).
    #[inline(always)]
    fn write_point(&mut self, pt: &RistrettoPoint) -> Result<()> {
        self.write_bytes(pt.compress().as_bytes())
    }

    /// Read a compressed Ristretto point, rejecting invalid encodings.
    #[inline(always)]
    fn read_point(&mut self) -> Result<RistrettoPoint> {
        let mut data = [0u8; 32];
        self.read_bytes(&mut data)?;
        CompressedRistretto(data)
            .decompress()
            .ok_or_else(|| Error::new(ErrorKind::InvalidData, "invalid ristretto point"))
    }
}

/// A standard channel over a separate reader and writer.
pub struct StdChannel<R, W> {
    reader: R,
    writer: W,

    read_bytes: usize,
    write_bytes: usize,
}

impl<R: Read, W: Write> StdChannel<R, W> {
    /// New a `StdChannel`
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            read_bytes: 0,
            write_bytes: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.write_bytes
    }

    /// Number of bytes read so far.
    pub fn bytes_read(&self) -> usize {
        self.read_bytes
    }
}

impl<R: Read, W: Write> AbstractChannel for StdChannel<R, W> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.write_bytes += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader.read_exact(bytes)?;
        self.read_bytes += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
    use curve25519_dalek::scalar::Scalar;
    use std::thread;

    #[test]
    fn local_channel_roundtrip_test() {
        let (mut sender, mut receiver) = local_channel_pair();

        let blk = rand::random::<Block>();
        let bools = vec![true, false, true, true];
        let point = &Scalar::from(42u64) * &RISTRETTO_BASEPOINT_TABLE;

        let handle = thread::spawn(move || {
            sender.write_bool(true).unwrap();
            sender.write_bools(&bools).unwrap();
            sender.write_u64(0xdead_beef).unwrap();
            sender.write_block(&blk).unwrap();
            sender.write_point(&point).unwrap();
            sender.flush().unwrap();
            sender.bytes_written()
        });

        assert!(receiver.read_bool().unwrap());
        assert_eq!(receiver.read_bools(4).unwrap(), vec![true, false, true, true]);
        assert_eq!(receiver.read_u64().unwrap(), 0xdead_beef);
        assert_eq!(receiver.read_block().unwrap(), blk);
        assert_eq!(receiver.read_point().unwrap(), point);

        let written = handle.join().unwrap();
        assert_eq!(written, receiver.bytes_read());
        assert_eq!(written, 1 + 4 + 8 + 16 + 32);
    }

    #[test]
    fn invalid_point_test() {
        let (mut sender, mut receiver) = local_channel_pair();
        // Not a canonical ristretto encoding.
        sender.write_bytes(&[0xff; 32]).unwrap();
        sender.flush().unwrap();

        let err = receiver.read_point().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
