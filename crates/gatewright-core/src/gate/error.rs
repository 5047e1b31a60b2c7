//! Gate module error types.

use thiserror::Error;

/// Errors that can occur when working with gate taxonomies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GateError {
    /// Invalid gate type string.
    #[error("invalid gate type: {value}")]
    InvalidGateType {
        /// The invalid value.
        value: String,
    },

    /// Invalid gate status string.
    #[error("invalid gate status: {value}")]
    InvalidGateStatus {
        /// The invalid value.
        value: String,
    },
}
