pub mod bitint;
pub mod errors;
pub mod gate;
pub mod load;

pub use bitint::{BitInt, Width};
pub use errors::{BitIntError, CircuitEvalError, CircuitLoadError};
pub use gate::{Circuit, Gate, Operation};
