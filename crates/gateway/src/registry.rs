//! Method registry — named-operation dispatch.
//!
//! The registry is the transport-independent half of the gateway: a map
//! from operation name to handler. Transports (HTTP, WebSocket) parse their
//! framing and hand `(method, params)` here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use workview_core::protocol::{ErrorShape, RequestHandler};

/// Name → handler map. Built once at startup; read-only afterwards, so
/// concurrent dispatches need no coordination.
#[derive(Default)]
pub struct MethodRegistry {
    handlers: HashMap<String, Arc<dyn RequestHandler>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own method name. Replaces any existing
    /// handler with the same name.
    pub fn register(&mut self, handler: Arc<dyn RequestHandler>) {
        self.handlers.insert(handler.method().to_string(), handler);
    }

    /// Dispatch one request to its handler.
    pub async fn dispatch(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ErrorShape> {
        let Some(handler) = self.handlers.get(method) else {
            warn!(method, "request for unknown method");
            return Err(ErrorShape::invalid_request(format!(
                "unknown method: {method}"
            )));
        };
        debug!(method, "dispatching request");
        handler.handle(params).await
    }

    /// All registered method names.
    pub fn methods(&self) -> Vec<&str> {
        self.handlers.keys().map(|name| name.as_str()).collect()
    }
}
