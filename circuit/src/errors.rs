use crate::gate::Operation;

#[derive(Debug, thiserror::Error)]
pub enum BitIntError {
    #[error("{bits} bits do not fit in a {width}-bit integer")]
    TooManyBits { bits: usize, width: usize },
    #[error("unsupported integer width {0}")]
    UnsupportedWidth(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitEvalError {
    #[error("uninitialized value, wire {0}")]
    UninitializedValue(usize),
    #[error("unsupported operation {op:?} at gate {gate_id}")]
    UnsupportedOperation { gate_id: usize, op: Operation },
    #[error("gate {gate_id} has {count} input wires, at most 2 are supported")]
    TooManyInputs { gate_id: usize, count: usize },
    #[error("gate {gate_id} ({op:?}) expects {expected} inputs and 1 output, got {inputs} and {outputs}")]
    ArityViolation {
        gate_id: usize,
        op: Operation,
        expected: usize,
        inputs: usize,
        outputs: usize,
    },
    #[error("expecting {expected} inputs, got {got}")]
    InvalidInputCount { expected: usize, got: usize },
    #[error("segment of {0} bits does not fit in a 64-bit integer")]
    SegmentTooWide(usize),
    #[error("integer conversion failed")]
    BitInt(#[from] BitIntError),
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitLoadError {
    #[error("encountered error while parsing circuit")]
    ParsingError(#[from] anyhow::Error),
    /// An I/O error occurred.
    #[error("encountered io error while loading circuit")]
    IoError(#[from] std::io::Error),
    /// The parsed description is inconsistent.
    #[error("invalid circuit: {0}")]
    InvalidCircuit(String),
}
