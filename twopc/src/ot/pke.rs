//! Hashed ElGamal over the Ristretto group, encrypting one `Block`.

use crypto_core::{AbstractChannel, Block};
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};
use std::io::Result;

use super::hash_to_block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(RistrettoPoint);

impl PublicKey {
    /// A uniformly random group element. Nobody knows its secret key.
    pub fn decoy<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self(RistrettoPoint::random(rng))
    }

    pub fn encrypt<R: Rng + CryptoRng>(&self, m: Block, rng: &mut R) -> Ciphertext {
        let r = Scalar::random(rng);
        let big_r = &r * &RISTRETTO_BASEPOINT_TABLE;
        let pad = hash_to_block(Sha256::new(), &big_r, &(r * self.0));
        Ciphertext { r: big_r, c: m ^ pad }
    }

    pub fn write<C: AbstractChannel>(&self, channel: &mut C) -> Result<()> {
        channel.write_point(&self.0)
    }

    pub fn read<C: AbstractChannel>(channel: &mut C) -> Result<Self> {
        Ok(Self(channel.read_point()?))
    }
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    sk: Scalar,
    pk: PublicKey,
}

impl KeyPair {
    pub fn generate<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let sk = Scalar::random(rng);
        let pk = PublicKey(&sk * &RISTRETTO_BASEPOINT_TABLE);
        Self { sk, pk }
    }

    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.pk
    }

    pub fn decrypt(&self, ct: &Ciphertext) -> Block {
        ct.c ^ hash_to_block(Sha256::new(), &ct.r, &(self.sk * ct.r))
    }
}

/// Ephemeral point and masked message, 48 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext {
    r: RistrettoPoint,
    c: Block,
}

impl Ciphertext {
    pub fn write<C: AbstractChannel>(&self, channel: &mut C) -> Result<()> {
        channel.write_point(&self.r)?;
        channel.write_block(&self.c)
    }

    pub fn read<C: AbstractChannel>(channel: &mut C) -> Result<Self> {
        let r = channel.read_point()?;
        let c = channel.read_block()?;
        Ok(Self { r, c })
    }
}
