// Error kinds surfaced by the summarization core
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizeError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No valid input: {0}")]
    UnreadableInput(String),

    #[error(
        "Summarization capacity exceeded on chunk {chunk} ({detail}); reduce the chunk size or switch to the extractive strategy"
    )]
    CapacityExceeded { chunk: usize, detail: String },

    #[error("{0}")]
    CapabilityFailure(String),

    #[error("Summarization cancelled on chunk {chunk}")]
    Cancelled { chunk: usize },
}

/// Failure reported by an external abstractive capability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
