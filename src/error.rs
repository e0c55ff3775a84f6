//! Error types for FlowSpend.
//!
//! The classifier and report aggregator never fail. Errors only arise at the
//! edges: configuration loading and flow record parsing.

use thiserror::Error;

/// FlowSpend error types.
#[derive(Error, Debug)]
pub enum FlowSpendError {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Flow record missing a required field
    #[error("Invalid flow record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Result type alias for FlowSpend operations.
pub type Result<T> = std::result::Result<T, FlowSpendError>;
