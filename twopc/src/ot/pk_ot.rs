//! 1-out-of-2 oblivious transfer from public-key encryption.
//!
//! The receiver sends two public keys: a genuine one at the position of its
//! choice bit and a decoy without a known secret key at the other. The sender
//! encrypts `x0` under the first key and `x1` under the second, and the
//! receiver can open only the message it chose. Both messages have a fixed
//! size, 64 bytes from the receiver and 96 bytes from the sender.

use crypto_core::{AbstractChannel, Block};
use rand::{CryptoRng, Rng};

use super::{Ciphertext, KeyPair, OTReceiverError, OTSenderError, OtReceiver, OtSender, PublicKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SenderState {
    Idle,
    InFlight,
}

#[derive(Debug)]
pub struct PkOtSender {
    state: SenderState,
}

impl Default for PkOtSender {
    fn default() -> Self {
        Self::new()
    }
}

impl PkOtSender {
    pub fn new() -> Self {
        Self {
            state: SenderState::Idle,
        }
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.state == SenderState::InFlight
    }

    /// Run one transfer of `x0`, `x1`. Does nothing while a transfer is in
    /// flight. A transfer interrupted by an I/O error leaves the sender in flight.
    pub fn start<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        x0: Block,
        x1: Block,
        rng: &mut R,
    ) -> Result<(), OTSenderError> {
        if self.is_in_flight() {
            tracing::warn!("OT start ignored, a transfer is already in flight");
            return Ok(());
        }
        self.state = SenderState::InFlight;

        let pk0 = PublicKey::read(channel)?;
        let pk1 = PublicKey::read(channel)?;
        pk0.encrypt(x0, rng).write(channel)?;
        pk1.encrypt(x1, rng).write(channel)?;
        channel.flush()?;

        self.state = SenderState::Idle;
        Ok(())
    }
}

impl OtSender for PkOtSender {
    type Msg = Block;

    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[(Block, Block)],
        rng: &mut R,
    ) -> Result<(), OTSenderError> {
        if self.is_in_flight() {
            return Err(OTSenderError::InFlight);
        }
        for (x0, x1) in inputs {
            self.start(channel, *x0, *x1, rng)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PkOtReceiver;

impl PkOtReceiver {
    pub fn new() -> Self {
        Self
    }

    /// Obtain `x_b` from the sender.
    pub fn ask_for<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        b: bool,
        rng: &mut R,
    ) -> Result<Block, OTReceiverError> {
        let kp = KeyPair::generate(rng);
        let decoy = PublicKey::decoy(rng);
        let keys = if b {
            [decoy, kp.public_key()]
        } else {
            [kp.public_key(), decoy]
        };
        for pk in keys.iter() {
            pk.write(channel)?;
        }
        channel.flush()?;

        let c0 = Ciphertext::read(channel)?;
        let c1 = Ciphertext::read(channel)?;
        Ok(kp.decrypt(if b { &c1 } else { &c0 }))
    }
}

impl OtReceiver for PkOtReceiver {
    type Msg = Block;

    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Block>, OTReceiverError> {
        inputs
            .iter()
            .map(|b| self.ask_for(channel, *b, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crypto_core::{local_channel_pair, AesRng, Block};

    use crate::{OtReceiver, OtSender, PkOtReceiver, PkOtSender};

    fn rand_block_vec(size: usize) -> Vec<Block> {
        (0..size).map(|_| rand::random::<Block>()).collect()
    }

    fn rand_bool_vec(size: usize) -> Vec<bool> {
        (0..size).map(|_| rand::random::<bool>()).collect()
    }

    #[test]
    fn local_pk_ot_test() {
        for b in [false, true] {
            let x0 = rand::random::<Block>();
            let x1 = rand::random::<Block>();
            let (mut sender, mut receiver) = local_channel_pair();

            let handle = thread::spawn(move || {
                let mut ot = PkOtSender::new();
                let mut rng = AesRng::new();
                ot.start(&mut sender, x0, x1, &mut rng).unwrap();
                assert!(!ot.is_in_flight());
                sender.bytes_written()
            });

            let mut rng = AesRng::new();
            let result = PkOtReceiver::new()
                .ask_for(&mut receiver, b, &mut rng)
                .unwrap();
            assert_eq!(result, if b { x1 } else { x0 });
            assert_ne!(result, if b { x0 } else { x1 });

            assert_eq!(handle.join().unwrap(), 96);
            assert_eq!(receiver.bytes_written(), 64);
        }
    }

    #[test]
    fn local_pk_ot_batch_test() {
        let m0 = rand_block_vec(64);
        let m1 = rand_block_vec(64);
        let m_inside: Vec<(Block, Block)> = m0.into_iter().zip(m1.into_iter()).collect();
        let m = m_inside.clone();
        let select = rand_bool_vec(64);

        let (mut sender, mut receiver) = local_channel_pair();

        let handle = thread::spawn(move || {
            let mut ot = PkOtSender::new();
            let mut rng = AesRng::new();
            ot.send(&mut sender, &m_inside, &mut rng).unwrap();
            ot.send(&mut sender, &m_inside, &mut rng).unwrap();
        });

        let mut rng = AesRng::new();
        let mut ot = PkOtReceiver::new();

        for _ in 0..2 {
            let result = ot.receive(&mut receiver, &select, &mut rng).unwrap();
            for i in 0..64 {
                assert_eq!(result[i], if select[i] { m[i].1 } else { m[i].0 });
            }
        }
        handle.join().unwrap();
    }

    #[test]
    fn in_flight_start_is_noop_test() {
        let (mut sender, receiver) = local_channel_pair();
        drop(receiver);

        let mut ot = PkOtSender::new();
        let mut rng = AesRng::new();
        let x = rand::random::<Block>();
        assert!(ot.start(&mut sender, x, x, &mut rng).is_err());
        assert!(ot.is_in_flight());

        // Ignored without touching the channel.
        assert!(ot.start(&mut sender, x, x, &mut rng).is_ok());
        assert!(ot.is_in_flight());
        assert_eq!(sender.bytes_written(), 0);
        assert_eq!(sender.bytes_read(), 0);

        assert!(matches!(
            ot.send(&mut sender, &[(x, x)], &mut rng),
            Err(crate::OTSenderError::InFlight)
        ));
    }
}
