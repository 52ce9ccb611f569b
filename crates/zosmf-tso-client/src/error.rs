//! Client error types — transport fault classification and session outcomes.

use thiserror::Error;

/// A fault reported by the transport layer, classified by whether a retry
/// can reasonably succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Fault that may clear on retry (network hiccup, host momentarily busy).
    #[error("transient transport fault: {0}")]
    Transient(String),

    /// Fault that will not clear on retry (bad credentials, protocol error).
    #[error("permanent transport fault: {0}")]
    Permanent(String),
}

impl TransportError {
    /// Whether the fault is worth a backoff-and-retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Transient(_))
    }
}

/// Errors surfaced by the session manager and command executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TsoClientError {
    /// A transport call failed and was not retryable.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No usable TSO session could be established within the retry budget.
    #[error("no usable TSO session could be established")]
    SessionUnavailable,

    /// The host never produced the READY prompt within the poll budget.
    #[error("READY prompt not seen after {polls} output polls")]
    ReadyTimeout {
        /// Polls performed before giving up.
        polls: u32,
    },
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TsoClientError>;
