use super::{EvaluatorError, GCEvaluator};
use crate::{DecodingTable, GarbledGate, GarbledTable, WireLabel};
use circuit::Circuit;
use crypto_core::{Block, ShaHash};

#[derive(Debug, Default, Clone, Copy)]
pub struct PointPermuteEvaluator;

impl PointPermuteEvaluator {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    pub fn unary_gate(&self, x: WireLabel, gate_id: usize, rows: &[Block; 2]) -> WireLabel {
        let row = rows[x.bit as usize];
        WireLabel::unpack(row ^ ShaHash::gate_hash1(x.key, gate_id))
    }

    #[inline]
    pub fn binary_gate(
        &self,
        x: WireLabel,
        y: WireLabel,
        gate_id: usize,
        rows: &[Block; 4],
    ) -> WireLabel {
        let row = rows[(x.bit as usize) << 1 | y.bit as usize];
        WireLabel::unpack(row ^ ShaHash::gate_hash2(x.key, y.key, gate_id))
    }
}

impl GCEvaluator for PointPermuteEvaluator {
    fn eval(
        &self,
        circ: &Circuit,
        table: &GarbledTable,
        input_labels: &[WireLabel],
    ) -> Result<Vec<WireLabel>, EvaluatorError> {
        if input_labels.len() != circ.ninput_wires() {
            return Err(EvaluatorError::InvalidInputCount {
                expected: circ.ninput_wires(),
                got: input_labels.len(),
            });
        }
        if table.gates.len() != circ.ngates() {
            return Err(EvaluatorError::TableMismatch(
                table.gates.len().min(circ.ngates()),
            ));
        }

        let mut wire_labels: Vec<Option<WireLabel>> = vec![None; circ.nwires()];
        for (wire, label) in wire_labels.iter_mut().zip(input_labels) {
            *wire = Some(*label);
        }

        for (gate_id, (gate, garbled)) in circ.gates().iter().zip(table.gates.iter()).enumerate() {
            let out = gate.check()?;
            let x = gate
                .inputs()
                .iter()
                .map(|id| wire_labels[*id].ok_or(EvaluatorError::UninitializedLabel(*id)))
                .collect::<Result<Vec<WireLabel>, _>>()?;

            let z = match (garbled, x.as_slice()) {
                (GarbledGate::Unary(rows), [a]) => self.unary_gate(*a, gate_id, rows),
                (GarbledGate::Binary(rows), [a, b]) => self.binary_gate(*a, *b, gate_id, rows),
                _ => return Err(EvaluatorError::TableMismatch(gate_id)),
            };
            wire_labels[out] = Some(z);
        }

        (circ.output_offset()..circ.nwires())
            .map(|id| wire_labels[id].ok_or(EvaluatorError::UninitializedLabel(id)))
            .collect()
    }

    fn decode(
        &self,
        circ: &Circuit,
        decoding: &DecodingTable,
        output_labels: &[WireLabel],
    ) -> Result<Vec<bool>, EvaluatorError> {
        if decoding.offset != circ.output_offset()
            || decoding.rows.len() != circ.noutput_wires()
            || output_labels.len() != circ.noutput_wires()
        {
            return Err(EvaluatorError::DecodingMismatch {
                expected: circ.noutput_wires(),
                got: decoding.rows.len().min(output_labels.len()),
            });
        }

        let zero = Block::zero();
        let one = Block::from(1u128);
        decoding
            .rows
            .iter()
            .zip(output_labels.iter())
            .enumerate()
            .map(|(j, (row, label))| {
                let wire = decoding.offset + j;
                let v = row[label.bit as usize] ^ ShaHash::output_hash(label.key, wire);
                if v == zero {
                    Ok(false)
                } else if v == one {
                    Ok(true)
                } else {
                    Err(EvaluatorError::InvalidDecode(wire))
                }
            })
            .collect()
    }
}
