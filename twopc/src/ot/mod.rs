//! Provides traits for oblivious transfer (OT) protocols.
//! These traits focus on 1-out-of-2 OTs.

pub mod errors;
pub mod pk_ot;
pub mod pke;

pub use errors::{OTReceiverError, OTSenderError};
pub use pk_ot::*;
pub use pke::*;

use crypto_core::AbstractChannel;
use crypto_core::Block;
use curve25519_dalek::ristretto::RistrettoPoint;
use rand::{CryptoRng, Rng};
use sha2::Digest;

/// Sender of OT
pub trait OtSender
where
    Self: Sized,
{
    /// Message type.
    type Msg: Sized + AsMut<[u8]>;

    /// Send one message of each pair.
    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[(Self::Msg, Self::Msg)],
        rng: &mut R,
    ) -> Result<(), OTSenderError>;
}

/// Receiver of OT
pub trait OtReceiver
where
    Self: Sized,
{
    /// Message type.
    type Msg: Sized + AsMut<[u8]>;

    /// Receive the chosen message of each pair.
    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Self::Msg>, OTReceiverError>;
}

/// `SHA256(r || m)` truncated to one block.
pub(crate) fn hash_to_block(
    mut hasher: sha2::Sha256,
    r: &RistrettoPoint,
    m: &RistrettoPoint,
) -> Block {
    hasher.update(r.compress().as_bytes());
    hasher.update(m.compress().as_bytes());

    let mut res = [0u8; 16];
    res.copy_from_slice(&hasher.finalize()[0..16]);
    Block::from(res)
}
