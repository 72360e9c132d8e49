//! Error types for the Workview domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The context subsystem
//! deliberately has only two failure classes, mirroring the two wire error
//! codes the gateway protocol carries.

use thiserror::Error;

/// Failure of a `context.list` / `context.read` operation.
///
/// - [`ContextError::InvalidRequest`] — the caller can correct the request
///   (bad path, wrong entry kind, disallowed type, oversized file). The
///   message never includes host paths beyond what the caller already
///   supplied.
/// - [`ContextError::Unavailable`] — unexpected environment failure
///   (I/O error other than not-found, permission failure). Carries the
///   underlying error's description for diagnostics; treated as
///   non-retryable by this layer.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl ContextError {
    /// Shorthand for an `InvalidRequest` with a fixed reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    /// Shorthand for an `Unavailable` wrapping an underlying failure.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// The caller-facing reason string, without the class prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidRequest(reason) | Self::Unavailable(reason) => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_class_and_reason() {
        let err = ContextError::invalid("invalid path");
        assert_eq!(err.to_string(), "invalid request: invalid path");
    }

    #[test]
    fn reason_strips_class_prefix() {
        let err = ContextError::unavailable("disk on fire");
        assert_eq!(err.reason(), "disk on fire");
        assert!(err.to_string().starts_with("unavailable:"));
    }
}
