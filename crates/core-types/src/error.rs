use thiserror::Error;

/// Raised when a price or return series would violate its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The first field names the offending input, the second says what is wrong.
    #[error("Invalid {0}: {1}")]
    InvalidInput(String, String),
}
