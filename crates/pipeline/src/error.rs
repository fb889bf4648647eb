//! Pipeline error types

use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The producer side of the pipeline went away
    #[error("producer channel closed")]
    ProducerClosed,
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
