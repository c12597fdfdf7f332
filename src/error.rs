//! Error types for the disruptor core.

use thiserror::Error;

/// Result type alias for disruptor operations.
pub type Result<T> = std::result::Result<T, SequencerError>;

/// Error type for the disruptor core.
///
/// The core recognises exactly three kinds of failure: invalid
/// construction parameters, a capability a wait strategy does not
/// implement, and the catch-all for conditions the design treats as
/// "should never happen" (a logic error rather than an expected
/// runtime outcome). A full buffer is *not* an error — `try_next`
/// reports it via its `-1` sentinel return, not this type.
#[derive(Error, Debug)]
pub enum SequencerError {
    /// Invalid construction parameter (non-power-of-two capacity, zero
    /// capacity, ...). Reported at construction time; never surfaces on
    /// the hot path.
    #[error("invalid configuration: {message}")]
    ConfigurationError {
        /// Description of the invalid parameter.
        message: String,
    },

    /// A requested capability a wait strategy does not implement, e.g.
    /// the dependent-sequence `wait_for` overload on the four built-in
    /// variants.
    #[error("not supported: {message}")]
    NotSupported {
        /// Description of the unsupported capability.
        message: String,
    },

    /// A bounded wait exceeded its configured timeout without the
    /// predicate becoming true.
    #[error("operation timed out")]
    Timeout,

    /// A condition the specification treats as undefined behaviour was
    /// observed in a context where the implementation chose to fail
    /// loudly instead of silently corrupting state.
    #[error("unexpected condition: {message}")]
    Unexpected {
        /// Description of the unexpected condition.
        message: String,
    },
}

impl SequencerError {
    /// Build a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Build a not-supported error.
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported {
            message: message.into(),
        }
    }

    /// Build an unexpected-condition error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Whether a caller could plausibly retry after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_not_recoverable() {
        let err = SequencerError::config("size must be a power of two");
        assert!(matches!(err, SequencerError::ConfigurationError { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn timeout_is_recoverable() {
        assert!(SequencerError::Timeout.is_recoverable());
    }

    #[test]
    fn not_supported_carries_message() {
        let err = SequencerError::not_supported("dependent sequences");
        match err {
            SequencerError::NotSupported { message } => {
                assert_eq!(message, "dependent sequences");
            }
            _ => panic!("wrong variant"),
        }
    }
}
