use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to calculate {metric}: need at least {required} observations, got {actual}")]
    InsufficientData {
        metric: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Degenerate sample for {0}: no observations fall in the tail")]
    DegenerateSample(&'static str),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(&'static str, String),
}

impl AnalyticsError {
    pub(crate) fn insufficient(metric: &'static str, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            metric,
            required,
            actual,
        }
    }
}
