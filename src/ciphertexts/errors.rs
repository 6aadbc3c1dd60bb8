use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CiphertextError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Capacity exceeded: got {got} values, max {max} slots")]
    CapacityExceeded { got: usize, max: usize },

    #[error("Poly modulus degrees don't match: expected {expected}, got {actual}")]
    SchemeMismatch { expected: usize, actual: usize },

    #[error("Scale mismatch: expected {expected:.2}, got {actual:.2}")]
    ScaleMismatch { expected: f64, actual: f64 },

    #[error("Unsupported operand: {message}")]
    UnsupportedOperand { message: String },
}

pub type CiphertextResult<T> = Result<T, CiphertextError>;

impl CiphertextError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
