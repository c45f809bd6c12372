//! Error types for the OpenTruth toolkit.
//!
//! All fallible operations in the workspace return `OpenTruthResult<T>`.
//! A resource being absent is never an error — it is a negative check
//! outcome. Errors are reserved for failures to persist, read, parse, or
//! configure.

use thiserror::Error;

/// The unified error type for the OpenTruth toolkit.
#[derive(Debug, Error)]
pub enum OpenTruthError {
    /// The proof ledger could not be created or appended to.
    ///
    /// Fatal for the self-check: a run that cannot be recorded is reported
    /// to the caller instead of being silently dropped.
    #[error("proof write failed for '{path}': {reason}")]
    ProofWriteFailed { path: String, reason: String },

    /// The proof ledger exists but could not be read.
    #[error("proof read failed for '{path}': {reason}")]
    ProofReadFailed { path: String, reason: String },

    /// A ledger line is not a well-formed proof record.
    #[error("malformed proof at line {line}: {reason}")]
    MalformedProof { line: usize, reason: String },

    /// A proof record was rejected before it was written.
    #[error("invalid proof: {reason}")]
    InvalidProof { reason: String },

    /// The agent layout file is missing, unreadable, or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A value could not be encoded as JSON.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Console output could not be written.
    #[error("output failed: {reason}")]
    OutputFailed { reason: String },
}

/// Convenience alias used throughout the OpenTruth crates.
pub type OpenTruthResult<T> = Result<T, OpenTruthError>;
