//! Gateway protocol — the request/response abstraction.
//!
//! A gateway operation is a named request carrying a single JSON object,
//! answered with either a result payload or a structured `{code, message}`
//! error. The [`RequestHandler`] trait is deliberately independent of the
//! transport used to reach it (HTTP, WebSocket, in-process call); transports
//! live in `workview-gateway`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Wire error codes. Two classes only: the caller can fix an
/// `INVALID_REQUEST`; an `UNAVAILABLE` is an environment failure the caller
/// may choose to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,

    #[serde(rename = "UNAVAILABLE")]
    Unavailable,
}

/// The structured error carried in a failed response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorShape {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorShape {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unavailable,
            message: message.into(),
        }
    }
}

impl From<ContextError> for ErrorShape {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::InvalidRequest(reason) => Self::invalid_request(reason),
            ContextError::Unavailable(reason) => Self::unavailable(reason),
        }
    }
}

impl std::fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self.code {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::Unavailable => "UNAVAILABLE",
        };
        write!(f, "{code}: {}", self.message)
    }
}

/// A named gateway operation.
///
/// Handlers receive the request's params as raw JSON (`null` when the caller
/// sent none) and must funnel every outcome into `Ok(payload)` or
/// `Err(ErrorShape)` — errors never escape a handler as a transport fault.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// The operation name this handler answers to (e.g., "context.list").
    fn method(&self) -> &str;

    /// Handle one request. Each call is self-contained; handlers hold no
    /// per-request state across calls.
    async fn handle(&self, params: serde_json::Value) -> Result<serde_json::Value, ErrorShape>;
}
