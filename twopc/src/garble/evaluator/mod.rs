pub mod point_permute_eval;

pub use point_permute_eval::*;

use super::errors::EvaluatorError;
use crate::{DecodingTable, GarbledTable, WireLabel};
use circuit::Circuit;

pub trait GCEvaluator {
    /// Evaluate the garbled table on one label per input wire and return the
    /// labels of the output wires.
    fn eval(
        &self,
        circ: &Circuit,
        table: &GarbledTable,
        input_labels: &[WireLabel],
    ) -> Result<Vec<WireLabel>, EvaluatorError>;

    /// Recover the output bits from the output labels.
    fn decode(
        &self,
        circ: &Circuit,
        decoding: &DecodingTable,
        output_labels: &[WireLabel],
    ) -> Result<Vec<bool>, EvaluatorError>;
}
