use super::{GCGenerator, GeneratorError};
use crate::{DecodingTable, GarbledGate, GarbledTable, LabelPair};
use circuit::{Circuit, Gate};
use crypto_core::{Block, ShaHash};

/// Garbles gate by gate with the point-and-permute technique: every row is
/// placed at the position given by the permutation bits of its input labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointPermuteGenerator;

impl PointPermuteGenerator {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    pub fn unary_gate(
        &self,
        gate: &Gate,
        gate_id: usize,
        x: &LabelPair,
        z: &LabelPair,
    ) -> Result<[Block; 2], GeneratorError> {
        let mut rows = [Block::zero(); 2];
        for va in [false, true] {
            let a = x.select(va);
            let c = z.select(gate.eval_plain(&[va])?);
            rows[a.bit as usize] = ShaHash::gate_hash1(a.key, gate_id) ^ c.pack();
        }
        Ok(rows)
    }

    #[inline]
    pub fn binary_gate(
        &self,
        gate: &Gate,
        gate_id: usize,
        x: &LabelPair,
        y: &LabelPair,
        z: &LabelPair,
    ) -> Result<[Block; 4], GeneratorError> {
        let mut rows = [Block::zero(); 4];
        for va in [false, true] {
            for vb in [false, true] {
                let a = x.select(va);
                let b = y.select(vb);
                let c = z.select(gate.eval_plain(&[va, vb])?);
                let index = (a.bit as usize) << 1 | b.bit as usize;
                rows[index] = ShaHash::gate_hash2(a.key, b.key, gate_id) ^ c.pack();
            }
        }
        Ok(rows)
    }

    /// Decoding rows of the output wires.
    pub fn decoding_table(&self, circ: &Circuit, labels: &[LabelPair]) -> DecodingTable {
        let offset = circ.output_offset();
        let rows = (offset..circ.nwires())
            .map(|wire| {
                let mut row = [Block::zero(); 2];
                for v in [false, true] {
                    let l = labels[wire].select(v);
                    row[l.bit as usize] = ShaHash::output_hash(l.key, wire) ^ Block::from(v as u128);
                }
                row
            })
            .collect();
        DecodingTable::new(offset, rows)
    }
}

impl GCGenerator for PointPermuteGenerator {
    fn garble(
        &self,
        circ: &Circuit,
        labels: &[LabelPair],
    ) -> Result<(GarbledTable, DecodingTable), GeneratorError> {
        if labels.len() != circ.nwires() {
            return Err(GeneratorError::InvalidLabelCount {
                expected: circ.nwires(),
                got: labels.len(),
            });
        }

        let mut gates = Vec::with_capacity(circ.ngates());
        for (gate_id, gate) in circ.gates().iter().enumerate() {
            let out = gate.check()?;
            let inputs = gate.inputs();
            let garbled = match inputs.len() {
                1 => GarbledGate::Unary(self.unary_gate(
                    gate,
                    gate_id,
                    &labels[inputs[0]],
                    &labels[out],
                )?),
                _ => GarbledGate::Binary(self.binary_gate(
                    gate,
                    gate_id,
                    &labels[inputs[0]],
                    &labels[inputs[1]],
                    &labels[out],
                )?),
            };
            gates.push(garbled);
        }

        Ok((GarbledTable::new(gates), self.decoding_table(circ, labels)))
    }
}
