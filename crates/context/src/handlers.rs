//! Gateway request handlers for the context operations.
//!
//! Thin adapters from the JSON request/response envelope to
//! [`ContextService`]. Every outcome — malformed params included — funnels
//! into the success/error response shape; nothing escapes as a transport
//! fault.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use workview_core::protocol::{ErrorShape, RequestHandler};

use crate::service::ContextService;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListParams {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReadParams {
    path: Option<String>,
}

/// Deserialize request params, treating `null` (no params sent) as empty.
fn parse_params<T: serde::de::DeserializeOwned + Default>(params: Value) -> Result<T, ErrorShape> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|err| ErrorShape::invalid_request(format!("malformed params: {err}")))
}

fn to_payload<T: serde::Serialize>(payload: T) -> Result<Value, ErrorShape> {
    serde_json::to_value(payload).map_err(|err| ErrorShape::unavailable(err.to_string()))
}

/// Handles `context.list`.
pub struct ContextListHandler {
    service: Arc<ContextService>,
}

impl ContextListHandler {
    pub fn new(service: Arc<ContextService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestHandler for ContextListHandler {
    fn method(&self) -> &str {
        "context.list"
    }

    async fn handle(&self, params: Value) -> Result<Value, ErrorShape> {
        let params: ListParams = parse_params(params)?;
        let requested = params.path.as_deref().unwrap_or("");
        let listing = self.service.list(requested).await?;
        to_payload(listing)
    }
}

/// Handles `context.read`.
pub struct ContextReadHandler {
    service: Arc<ContextService>,
}

impl ContextReadHandler {
    pub fn new(service: Arc<ContextService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestHandler for ContextReadHandler {
    fn method(&self) -> &str {
        "context.read"
    }

    async fn handle(&self, params: Value) -> Result<Value, ErrorShape> {
        let params: ReadParams = parse_params(params)?;
        let requested = params.path.as_deref().unwrap_or("");
        let file = self.service.read(requested).await?;
        to_payload(file)
    }
}

/// Both context handlers over one shared service, ready for registration.
pub fn context_handlers(service: Arc<ContextService>) -> Vec<Arc<dyn RequestHandler>> {
    vec![
        Arc::new(ContextListHandler::new(service.clone())) as Arc<dyn RequestHandler>,
        Arc::new(ContextReadHandler::new(service)),
    ]
}
