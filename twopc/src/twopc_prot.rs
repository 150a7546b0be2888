//! The two roles of a garbled circuit computation.
//!
//! The garbler garbles the circuit and sends the tables, then hands over the
//! labels of every input segment: directly for its own segments and through
//! OT for the evaluator's. The evaluator evaluates, decodes and sends the
//! plaintext outputs back, so both parties end with the same result.

use circuit::{BitInt, Circuit, CircuitEvalError, Width};
use crypto_core::{AbstractChannel, NetChannel};
use rand::{CryptoRng, Rng};
use std::io;
use std::net::TcpStream;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use crate::{
    encode, gen_label_pairs, receive_label, receive_tables, send_label, send_tables,
    DecodingTable, EvaluatorError, GCEvaluator, GCGenerator, GarbledTable, GeneratorError,
    OTReceiverError, OTSenderError, PkOtReceiver, PkOtSender, PointPermuteEvaluator,
    PointPermuteGenerator, WireLabel,
};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("IO error")]
    Io(#[from] io::Error),
    #[error("circuit error")]
    Circuit(#[from] CircuitEvalError),
    #[error("garbling failed")]
    Generator(#[from] GeneratorError),
    #[error("evaluation failed")]
    Evaluator(#[from] EvaluatorError),
    #[error("OT sender failed")]
    OtSender(#[from] OTSenderError),
    #[error("OT receiver failed")]
    OtReceiver(#[from] OTReceiverError),
    #[error("parties disagree on the owner of input segment {segment}")]
    OwnershipMismatch { segment: usize },
    #[error("expecting {expected} input segments, got {got}")]
    InvalidInputCount { expected: usize, got: usize },
    #[error("peer aborted the protocol")]
    PeerAborted,
    #[error("unknown role {0}")]
    UnknownRole(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Garbler,
    Evaluator,
}

impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "garbler" | "sender" => Ok(Role::Garbler),
            "evaluator" | "receiver" => Ok(Role::Evaluator),
            _ => Err(ProtocolError::UnknownRole(s.to_string())),
        }
    }
}

/// Where a party reaches its peer.
///
/// The garbler connects the main channel and listens for the OT channel; the
/// evaluator does the opposite. Only connecting sides retry.
#[derive(Debug, Clone)]
pub struct PartyConfig {
    pub role: Role,
    pub addr: String,
    pub ot_addr: String,
    pub connect_attempts: usize,
}

impl PartyConfig {
    pub fn new(role: Role, addr: &str, ot_addr: &str) -> Self {
        Self {
            role,
            addr: addr.to_string(),
            ot_addr: ot_addr.to_string(),
            connect_attempts: 20,
        }
    }

    /// Open the main channel and the OT channel, in that order.
    pub fn connect(
        &self,
    ) -> io::Result<(NetChannel<TcpStream, TcpStream>, NetChannel<TcpStream, TcpStream>)> {
        match self.role {
            Role::Garbler => {
                let channel = self.connect_with_retry(&self.addr)?;
                let ot_channel = NetChannel::listen(self.ot_addr.as_str())?;
                Ok((channel, ot_channel))
            }
            Role::Evaluator => {
                let channel = NetChannel::listen(self.addr.as_str())?;
                let ot_channel = self.connect_with_retry(&self.ot_addr)?;
                Ok((channel, ot_channel))
            }
        }
    }

    fn connect_with_retry(&self, addr: &str) -> io::Result<NetChannel<TcpStream, TcpStream>> {
        let mut attempt = 1;
        loop {
            match NetChannel::connect(addr) {
                Ok(channel) => return Ok(channel),
                Err(e) if attempt < self.connect_attempts => {
                    tracing::debug!(addr, attempt, error = %e, "connect failed, retrying");
                    attempt += 1;
                    thread::sleep(Duration::from_millis(250));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Checks shared by both roles before any message is exchanged.
fn check_setup(circ: &Circuit, inputs: &[Option<BitInt>]) -> Result<(), ProtocolError> {
    for gate in circ.gates() {
        gate.check()?;
    }
    if let Some(size) = circ
        .input_sizes()
        .iter()
        .chain(circ.output_sizes().iter())
        .find(|size| **size > Width::W64.bits())
    {
        return Err(CircuitEvalError::SegmentTooWide(*size).into());
    }
    if inputs.len() != circ.ninputs() {
        return Err(ProtocolError::InvalidInputCount {
            expected: circ.ninputs(),
            got: inputs.len(),
        });
    }
    Ok(())
}

fn segment_bits(value: &BitInt, size: usize) -> Vec<bool> {
    (0..size).map(|j| value.digit(j)).collect()
}

pub struct Garbler<C: AbstractChannel> {
    channel: C,
    ot_channel: C,
}

impl<C: AbstractChannel> Garbler<C> {
    pub fn new(channel: C, ot_channel: C) -> Self {
        Self {
            channel,
            ot_channel,
        }
    }

    /// Run the protocol on the garbler's inputs, `None` marking the segments
    /// owned by the evaluator.
    #[tracing::instrument(skip_all, fields(role = "garbler"))]
    pub fn run<R: Rng + CryptoRng>(
        &mut self,
        circ: &Circuit,
        inputs: &[Option<BitInt>],
        rng: &mut R,
    ) -> Result<Vec<BitInt>, ProtocolError> {
        check_setup(circ, inputs)?;

        let labels = gen_label_pairs(rng, circ);
        let (table, decoding) = PointPermuteGenerator::new().garble(circ, &labels)?;
        send_tables(&mut self.channel, &table, &decoding)?;
        self.channel.flush()?;
        tracing::info!(ngates = circ.ngates(), "sent garbled tables");

        if !self.channel.read_bool()? {
            return Err(ProtocolError::PeerAborted);
        }

        let mut ot = PkOtSender::new();
        let mut offset = 0;
        for (segment, (input, size)) in inputs.iter().zip(circ.input_sizes().iter()).enumerate() {
            let size = *size;
            let wires = &labels[offset..offset + size];

            self.channel.write_bool(input.is_some())?;
            self.channel.flush()?;
            if !self.channel.read_bool()? {
                return Err(ProtocolError::OwnershipMismatch { segment });
            }

            match input {
                Some(value) => {
                    for label in encode(wires, &segment_bits(value, size)).iter() {
                        send_label(&mut self.channel, label)?;
                    }
                    self.channel.flush()?;
                    if !self.channel.read_bool()? {
                        return Err(ProtocolError::PeerAborted);
                    }
                    tracing::debug!(segment, size, "sent own input labels");
                }
                None => {
                    for pair in wires.iter() {
                        ot.start(
                            &mut self.ot_channel,
                            pair.zero().pack(),
                            pair.one().pack(),
                            rng,
                        )?;
                    }
                    tracing::debug!(segment, size, "sent peer input labels through OT");
                }
            }
            offset += size;
        }

        if !self.channel.read_bool()? {
            return Err(ProtocolError::PeerAborted);
        }
        let mut outputs = Vec::with_capacity(circ.noutputs());
        for _ in 0..circ.noutputs() {
            outputs.push(BitInt::from(self.channel.read_u64()?));
        }
        tracing::info!("received outputs");
        Ok(outputs)
    }
}

pub struct Evaluator<C: AbstractChannel> {
    channel: C,
    ot_channel: C,
}

impl<C: AbstractChannel> Evaluator<C> {
    pub fn new(channel: C, ot_channel: C) -> Self {
        Self {
            channel,
            ot_channel,
        }
    }

    /// Run the protocol on the evaluator's inputs, `None` marking the segments
    /// owned by the garbler.
    #[tracing::instrument(skip_all, fields(role = "evaluator"))]
    pub fn run<R: Rng + CryptoRng>(
        &mut self,
        circ: &Circuit,
        inputs: &[Option<BitInt>],
        rng: &mut R,
    ) -> Result<Vec<BitInt>, ProtocolError> {
        check_setup(circ, inputs)?;

        let (table, decoding) = receive_tables(&mut self.channel, circ)?;
        self.channel.write_bool(true)?;
        self.channel.flush()?;
        tracing::info!(ngates = circ.ngates(), "received garbled tables");

        let mut ot = PkOtReceiver::new();
        let mut input_labels = Vec::with_capacity(circ.ninput_wires());
        for (segment, (input, size)) in inputs.iter().zip(circ.input_sizes().iter()).enumerate() {
            let size = *size;

            let garbler_owns = self.channel.read_bool()?;
            let consistent = garbler_owns == input.is_none();
            self.channel.write_bool(consistent)?;
            self.channel.flush()?;
            if !consistent {
                return Err(ProtocolError::OwnershipMismatch { segment });
            }

            match input {
                None => {
                    for _ in 0..size {
                        input_labels.push(receive_label(&mut self.channel)?);
                    }
                    self.channel.write_bool(true)?;
                    self.channel.flush()?;
                    tracing::debug!(segment, size, "received peer input labels");
                }
                Some(value) => {
                    for bit in segment_bits(value, size) {
                        let packed = ot.ask_for(&mut self.ot_channel, bit, rng)?;
                        input_labels.push(WireLabel::unpack(packed));
                    }
                    tracing::debug!(segment, size, "received own input labels through OT");
                }
            }
        }

        match Self::evaluate(circ, &table, &decoding, &input_labels) {
            Ok(outputs) => {
                self.channel.write_bool(true)?;
                for output in outputs.iter() {
                    self.channel.write_u64(output.value())?;
                }
                self.channel.flush()?;
                tracing::info!("sent outputs");
                Ok(outputs)
            }
            Err(e) => {
                tracing::warn!(error = %e, "evaluation failed, aborting");
                self.channel.write_bool(false)?;
                self.channel.flush()?;
                Err(e)
            }
        }
    }

    fn evaluate(
        circ: &Circuit,
        table: &GarbledTable,
        decoding: &DecodingTable,
        input_labels: &[WireLabel],
    ) -> Result<Vec<BitInt>, ProtocolError> {
        let ev = PointPermuteEvaluator::new();
        let output_labels = ev.eval(circ, table, input_labels)?;
        let bits = ev.decode(circ, decoding, &output_labels)?;
        Ok(circ.pack_outputs(&bits)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use circuit::{BitInt, Circuit, CircuitEvalError, Gate, Operation};
    use crypto_core::{local_channel_pair, AbstractChannel, AesRng, LocalChannel};

    use super::{Evaluator, Garbler, ProtocolError, Role};
    use crate::receive_tables;

    type Outcome = Result<Vec<BitInt>, ProtocolError>;

    fn run_2pc(
        circ: Circuit,
        garbler_inputs: Vec<Option<BitInt>>,
        evaluator_inputs: Vec<Option<BitInt>>,
    ) -> (Outcome, Outcome) {
        let circ = Arc::new(circ);
        let (g_channel, e_channel) = local_channel_pair();
        let (g_ot, e_ot) = local_channel_pair();

        let g_circ = circ.clone();
        let handle = thread::spawn(move || {
            let mut rng = AesRng::new();
            Garbler::new(g_channel, g_ot).run(&g_circ, &garbler_inputs, &mut rng)
        });

        let mut rng = AesRng::new();
        let e_out = Evaluator::new(e_channel, e_ot).run(&circ, &evaluator_inputs, &mut rng);
        let g_out = handle.join().unwrap();
        (g_out, e_out)
    }

    fn load(name: &str) -> Circuit {
        Circuit::load(&format!("../circuit/circuit_files/bristol/{name}.txt")).unwrap()
    }

    #[test]
    fn full_adder_2pc_test() {
        let (g, e) = run_2pc(
            load("full_adder"),
            vec![Some(BitInt::from(1u8)), None],
            vec![None, Some(BitInt::from(1u8))],
        );
        assert_eq!(g.unwrap(), vec![BitInt::from(2u64)]);
        assert_eq!(e.unwrap(), vec![BitInt::from(2u64)]);
    }

    #[test]
    fn adder64_2pc_test() {
        let (g, e) = run_2pc(
            load("adder64"),
            vec![Some(BitInt::from(15u64)), None],
            vec![None, Some(BitInt::from(26u64))],
        );
        assert_eq!(g.unwrap(), vec![BitInt::from(41u64)]);
        assert_eq!(e.unwrap(), vec![BitInt::from(41u64)]);
    }

    #[test]
    fn mult64_2pc_test() {
        let (g, e) = run_2pc(
            load("mult64"),
            vec![Some(BitInt::from(7u64)), None],
            vec![None, Some(BitInt::from(201u64))],
        );
        assert_eq!(g.unwrap(), vec![BitInt::from(1407u64)]);
        assert_eq!(e.unwrap(), vec![BitInt::from(1407u64)]);
    }

    #[test]
    fn one_sided_inputs_2pc_test() {
        // The evaluator owns both segments.
        let (g, e) = run_2pc(
            load("adder64"),
            vec![None, None],
            vec![Some(BitInt::from(u64::MAX)), Some(BitInt::from(2u64))],
        );
        assert_eq!(g.unwrap(), vec![BitInt::from(1u64)]);
        assert_eq!(e.unwrap(), vec![BitInt::from(1u64)]);

        // The garbler owns the only segment.
        let (g, e) = run_2pc(load("neg8"), vec![Some(BitInt::from(3u8))], vec![None]);
        assert_eq!(g.unwrap(), vec![BitInt::from(253u64)]);
        assert_eq!(e.unwrap(), vec![BitInt::from(253u64)]);
    }

    #[test]
    fn unsupported_operation_2pc_test() {
        for op in [Operation::Mand, Operation::Eq] {
            let gates = vec![Gate::new(0, op, vec![0, 1], vec![2])];
            let circ = Circuit::new(gates, 3, vec![1, 1], vec![1]).unwrap();
            let (g, e) = run_2pc(
                circ,
                vec![Some(BitInt::from(1u8)), None],
                vec![None, Some(BitInt::from(1u8))],
            );
            for out in [g, e] {
                assert!(matches!(
                    out,
                    Err(ProtocolError::Circuit(CircuitEvalError::UnsupportedOperation {
                        gate_id: 0,
                        ..
                    }))
                ));
            }
        }
    }

    #[test]
    fn ownership_mismatch_2pc_test() {
        // Both claim segment 0.
        let (g, e) = run_2pc(
            load("adder64"),
            vec![Some(BitInt::from(1u64)), None],
            vec![Some(BitInt::from(2u64)), None],
        );
        assert!(matches!(g, Err(ProtocolError::OwnershipMismatch { segment: 0 })));
        assert!(matches!(e, Err(ProtocolError::OwnershipMismatch { segment: 0 })));

        // Nobody claims segment 1.
        let (g, e) = run_2pc(
            load("adder64"),
            vec![Some(BitInt::from(1u64)), None],
            vec![None, None],
        );
        assert!(matches!(g, Err(ProtocolError::OwnershipMismatch { segment: 1 })));
        assert!(matches!(e, Err(ProtocolError::OwnershipMismatch { segment: 1 })));
    }

    #[test]
    fn input_count_2pc_test() {
        let (g, e) = run_2pc(
            load("adder64"),
            vec![Some(BitInt::from(1u64))],
            vec![None, Some(BitInt::from(2u64))],
        );
        assert!(matches!(
            g,
            Err(ProtocolError::InvalidInputCount { expected: 2, got: 1 })
        ));
        // The garbler hung up before sending anything.
        assert!(matches!(e, Err(ProtocolError::Io(_))));
    }

    #[test]
    fn peer_aborted_test() {
        let circ = Arc::new(load("full_adder"));
        let (g_channel, mut e_channel) = local_channel_pair();
        let (g_ot, _e_ot) = local_channel_pair();

        let g_circ = circ.clone();
        let handle = thread::spawn(move || {
            let mut rng = AesRng::new();
            Garbler::<LocalChannel>::new(g_channel, g_ot).run(
                &g_circ,
                &[Some(BitInt::from(1u8)), None],
                &mut rng,
            )
        });

        receive_tables(&mut e_channel, &circ).unwrap();
        e_channel.write_bool(false).unwrap();
        e_channel.flush().unwrap();

        assert!(matches!(
            handle.join().unwrap(),
            Err(ProtocolError::PeerAborted)
        ));
    }

    #[test]
    fn role_from_str_test() {
        assert_eq!("garbler".parse::<Role>().unwrap(), Role::Garbler);
        assert_eq!("Receiver".parse::<Role>().unwrap(), Role::Evaluator);
        assert!(matches!(
            "notary".parse::<Role>(),
            Err(ProtocolError::UnknownRole(_))
        ));
    }
}
