use circuit::CircuitEvalError;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("circuit error while garbling")]
    Circuit(#[from] CircuitEvalError),
    #[error("expecting {expected} label pairs, got {got}")]
    InvalidLabelCount { expected: usize, got: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("circuit error while evaluating")]
    Circuit(#[from] CircuitEvalError),
    #[error("uninitialized label, wire {0}")]
    UninitializedLabel(usize),
    #[error("expecting {expected} input labels, got {got}")]
    InvalidInputCount { expected: usize, got: usize },
    #[error("garbled table does not match the circuit at gate {0}")]
    TableMismatch(usize),
    #[error("expecting {expected} decoding rows, got {got}")]
    DecodingMismatch { expected: usize, got: usize },
    #[error("output wire {0} decoded to a value outside {{0, 1}}")]
    InvalidDecode(usize),
}
