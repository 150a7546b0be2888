//! Define the structure of gates and circuits.

use crate::bitint::{BitInt, Width};
use crate::errors::{CircuitEvalError, CircuitLoadError};

/// Gate operations of the (extended) Bristol fashion format.
///
/// Only `Xor`, `And` and `Not` can be evaluated; the rest are recognized by the
/// parser and rejected at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Xor,
    And,
    Not,
    Eq,
    Eqw,
    Mand,
}

impl Operation {
    /// Operation from its Bristol name. `INV` and `NOT` are synonyms.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "XOR" => Some(Operation::Xor),
            "AND" => Some(Operation::And),
            "INV" | "NOT" => Some(Operation::Not),
            "EQ" => Some(Operation::Eq),
            "EQW" => Some(Operation::Eqw),
            "MAND" => Some(Operation::Mand),
            _ => None,
        }
    }

    /// Number of input wires, or `None` when the operation is unsupported.
    #[inline]
    pub fn arity(self) -> Option<usize> {
        match self {
            Operation::Xor | Operation::And => Some(2),
            Operation::Not => Some(1),
            Operation::Eq | Operation::Eqw | Operation::Mand => None,
        }
    }
}

/// `id` is the position of the gate in the circuit.
/// `inputs` and `outputs` are wire ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    id: usize,
    op: Operation,
    inputs: Vec<usize>,
    outputs: Vec<usize>,
}

impl Gate {
    pub fn new(id: usize, op: Operation, inputs: Vec<usize>, outputs: Vec<usize>) -> Self {
        Self {
            id,
            op,
            inputs,
            outputs,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn op(&self) -> Operation {
        self.op
    }

    #[inline]
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    /// Check that the gate can be evaluated and return its single output wire.
    pub fn check(&self) -> Result<usize, CircuitEvalError> {
        let expected = self
            .op
            .arity()
            .ok_or(CircuitEvalError::UnsupportedOperation {
                gate_id: self.id,
                op: self.op,
            })?;
        if self.inputs.len() > 2 {
            return Err(CircuitEvalError::TooManyInputs {
                gate_id: self.id,
                count: self.inputs.len(),
            });
        }
        if self.inputs.len() != expected || self.outputs.len() != 1 {
            return Err(CircuitEvalError::ArityViolation {
                gate_id: self.id,
                op: self.op,
                expected,
                inputs: self.inputs.len(),
                outputs: self.outputs.len(),
            });
        }
        Ok(self.outputs[0])
    }

    /// Plaintext truth table of the gate.
    pub fn eval_plain(&self, x: &[bool]) -> Result<bool, CircuitEvalError> {
        self.check()?;
        let out = match self.op {
            Operation::Xor => x[0] ^ x[1],
            Operation::And => x[0] & x[1],
            Operation::Not => !x[0],
            Operation::Eq | Operation::Eqw | Operation::Mand => {
                return Err(CircuitEvalError::UnsupportedOperation {
                    gate_id: self.id,
                    op: self.op,
                })
            }
        };
        Ok(out)
    }
}

/// Define a circuit. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    nwires: usize,
    input_sizes: Vec<usize>,
    output_sizes: Vec<usize>,
    ninput_wires: usize,
    noutput_wires: usize,
    nand: usize,
    nxor: usize,
    ninv: usize,
    gates: Vec<Gate>,
}

/// Total wire count of the segments, `None` on overflow.
fn total_wires(sizes: &[usize]) -> Option<usize> {
    sizes.iter().try_fold(0usize, |acc, size| acc.checked_add(*size))
}

impl Circuit {
    /// Build a circuit, checking that every wire id and segment fits in `nwires`
    /// and that every gate id is the position of the gate.
    ///
    /// Gates must be listed in topological order; this is not verified here.
    pub fn new(
        gates: Vec<Gate>,
        nwires: usize,
        input_sizes: Vec<usize>,
        output_sizes: Vec<usize>,
    ) -> Result<Self, CircuitLoadError> {
        let (ninput_wires, noutput_wires) =
            match (total_wires(&input_sizes), total_wires(&output_sizes)) {
                (Some(i), Some(o)) => (i, o),
                _ => {
                    return Err(CircuitLoadError::InvalidCircuit(
                        "segment sizes overflow".to_string(),
                    ))
                }
            };
        if ninput_wires > nwires || noutput_wires > nwires {
            return Err(CircuitLoadError::InvalidCircuit(format!(
                "{ninput_wires} input wires and {noutput_wires} output wires exceed {nwires} wires"
            )));
        }
        for (position, gate) in gates.iter().enumerate() {
            if gate.id() != position {
                return Err(CircuitLoadError::InvalidCircuit(format!(
                    "gate at position {position} has id {}",
                    gate.id()
                )));
            }
            if let Some(w) = gate
                .inputs()
                .iter()
                .chain(gate.outputs())
                .find(|w| **w >= nwires)
            {
                return Err(CircuitLoadError::InvalidCircuit(format!(
                    "gate {} references wire {w}, circuit has {nwires} wires",
                    gate.id()
                )));
            }
        }

        let count = |op| gates.iter().filter(|g| g.op() == op).count();
        let (nand, nxor, ninv) = (
            count(Operation::And),
            count(Operation::Xor),
            count(Operation::Not),
        );

        Ok(Circuit {
            nwires,
            input_sizes,
            output_sizes,
            ninput_wires,
            noutput_wires,
            nand,
            nxor,
            ninv,
            gates,
        })
    }

    /// Number of wires
    #[inline]
    pub fn nwires(&self) -> usize {
        self.nwires
    }

    /// Bit size of each input segment
    #[inline]
    pub fn input_sizes(&self) -> &[usize] {
        &self.input_sizes
    }

    /// Bit size of each output segment
    #[inline]
    pub fn output_sizes(&self) -> &[usize] {
        &self.output_sizes
    }

    /// Total number of input wires
    #[inline]
    pub fn ninput_wires(&self) -> usize {
        self.ninput_wires
    }

    /// Total number of output wires
    #[inline]
    pub fn noutput_wires(&self) -> usize {
        self.noutput_wires
    }

    #[inline]
    pub fn nand(&self) -> usize {
        self.nand
    }

    #[inline]
    pub fn nxor(&self) -> usize {
        self.nxor
    }

    #[inline]
    pub fn ninv(&self) -> usize {
        self.ninv
    }

    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[inline]
    pub fn ngates(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn ninputs(&self) -> usize {
        self.input_sizes.len()
    }

    #[inline]
    pub fn noutputs(&self) -> usize {
        self.output_sizes.len()
    }

    /// First output wire. Outputs occupy the last `noutput_wires` wires.
    #[inline]
    pub fn output_offset(&self) -> usize {
        self.nwires - self.noutput_wires
    }

    /// Evaluate the circuit in plaintext on input bits, one per input wire.
    pub fn eval_bits(&self, inputs: &[bool]) -> Result<Vec<bool>, CircuitEvalError> {
        if inputs.len() != self.ninput_wires {
            return Err(CircuitEvalError::InvalidInputCount {
                expected: self.ninput_wires,
                got: inputs.len(),
            });
        }

        let mut wires: Vec<Option<bool>> = vec![None; self.nwires];
        for (wire, bit) in wires.iter_mut().zip(inputs) {
            *wire = Some(*bit);
        }

        for gate in self.gates.iter() {
            let x = gate
                .inputs()
                .iter()
                .map(|id| wires[*id].ok_or(CircuitEvalError::UninitializedValue(*id)))
                .collect::<Result<Vec<bool>, _>>()?;
            let val = gate.eval_plain(&x)?;
            wires[gate.outputs()[0]] = Some(val);
        }

        // The last `noutput_wires` slots store the output bits.
        (self.output_offset()..self.nwires)
            .map(|id| wires[id].ok_or(CircuitEvalError::UninitializedValue(id)))
            .collect()
    }

    /// Evaluate the circuit in plaintext, one integer per input segment.
    pub fn eval(&self, inputs: &[BitInt]) -> Result<Vec<BitInt>, CircuitEvalError> {
        if inputs.len() != self.ninputs() {
            return Err(CircuitEvalError::InvalidInputCount {
                expected: self.ninputs(),
                got: inputs.len(),
            });
        }
        let bits = self.input_bits(inputs)?;
        let outputs = self.eval_bits(&bits)?;
        self.pack_outputs(&outputs)
    }

    /// Spread one integer per input segment over the input wires.
    pub fn input_bits(&self, inputs: &[BitInt]) -> Result<Vec<bool>, CircuitEvalError> {
        let mut bits = Vec::with_capacity(self.ninput_wires);
        for (input, size) in inputs.iter().zip(self.input_sizes.iter()) {
            if *size > Width::W64.bits() {
                return Err(CircuitEvalError::SegmentTooWide(*size));
            }
            bits.extend((0..*size).map(|j| input.digit(j)));
        }
        Ok(bits)
    }

    /// Repack output wire bits into one 64-bit integer per output segment.
    pub fn pack_outputs(&self, bits: &[bool]) -> Result<Vec<BitInt>, CircuitEvalError> {
        let mut outputs = Vec::with_capacity(self.noutputs());
        let mut offset = 0;
        for size in self.output_sizes.iter() {
            if *size > Width::W64.bits() {
                return Err(CircuitEvalError::SegmentTooWide(*size));
            }
            outputs.push(BitInt::from_bits(
                &bits[offset..offset + size],
                Width::W64,
            )?);
            offset += size;
        }
        Ok(outputs)
    }
}
