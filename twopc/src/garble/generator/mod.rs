pub mod point_permute_gen;

pub use point_permute_gen::*;

use super::errors::GeneratorError;
use crate::{DecodingTable, GarbledTable, LabelPair, WireLabel};
use circuit::Circuit;
use rand::{CryptoRng, Rng};

pub trait GCGenerator {
    /// Garble `circ` under `labels`, one pair per wire.
    fn garble(
        &self,
        circ: &Circuit,
        labels: &[LabelPair],
    ) -> Result<(GarbledTable, DecodingTable), GeneratorError>;
}

/// Sample a fresh label pair for every wire of `circ`.
pub fn gen_label_pairs<R: Rng + CryptoRng>(rng: &mut R, circ: &Circuit) -> Vec<LabelPair> {
    (0..circ.nwires()).map(|_| LabelPair::random(rng)).collect()
}

/// Select the label of each bit, `bits[i]` on wire `i`.
pub fn encode(labels: &[LabelPair], bits: &[bool]) -> Vec<WireLabel> {
    labels
        .iter()
        .zip(bits.iter())
        .map(|(pair, bit)| pair.select(*bit))
        .collect()
}
