//! Gateway transport for Workview.
//!
//! Exposes the registered operations over two equivalent framings:
//!
//! - `POST /rpc` — one `{id?, method, params?}` request per call
//! - `GET  /ws`  — the same frames over a persistent WebSocket, answered
//!   in order (the framing the remote UI uses)
//! - `GET  /health` — liveness probe
//!
//! The transport is deliberately thin: it parses frames and hands
//! `(method, params)` to the [`registry::MethodRegistry`]. All operation
//! semantics live behind [`workview_core::protocol::RequestHandler`].
//! Handler failures are carried in the response envelope; they never
//! surface as transport faults.
//!
//! Built on Axum, matching the rest of the stack.

pub mod registry;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use registry::MethodRegistry;
use workview_core::protocol::ErrorShape;
use workview_core::workspace::WorkspaceResolver;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub registry: MethodRegistry,
}

pub type SharedState = Arc<GatewayState>;

/// State wired for context browsing over the given workspace resolver.
pub fn context_state(resolver: Arc<dyn WorkspaceResolver>) -> SharedState {
    let service = Arc::new(workview_context::ContextService::new(resolver));
    let mut registry = MethodRegistry::new();
    for handler in workview_context::context_handlers(service) {
        registry.register(handler);
    }
    Arc::new(GatewayState { registry })
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/rpc", post(rpc_handler))
        .route("/ws", get(ws_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway server.
///
/// The workspace is re-resolved from configuration on every request, so
/// config edits take effect without a restart.
pub async fn start(config: workview_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let resolver = Arc::new(workview_config::ConfigWorkspaceResolver::new());
    let state = context_state(resolver);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Frames ---

/// One request as carried by both transports.
#[derive(Debug, Deserialize)]
struct RequestFrame {
    /// Opaque correlation id, echoed back verbatim.
    #[serde(default)]
    id: Option<serde_json::Value>,

    method: String,

    /// `null` when the caller sent no params.
    #[serde(default)]
    params: serde_json::Value,
}

/// The success/failure response envelope.
#[derive(Debug, Serialize)]
struct ResponseFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<serde_json::Value>,

    ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorShape>,
}

impl ResponseFrame {
    fn success(id: Option<serde_json::Value>, payload: serde_json::Value) -> Self {
        Self {
            id,
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    fn failure(id: Option<serde_json::Value>, error: ErrorShape) -> Self {
        Self {
            id,
            ok: false,
            payload: None,
            error: Some(error),
        }
    }
}

async fn respond(state: &GatewayState, raw: serde_json::Value) -> ResponseFrame {
    let frame: RequestFrame = match serde_json::from_value(raw) {
        Ok(frame) => frame,
        Err(err) => {
            return ResponseFrame::failure(
                None,
                ErrorShape::invalid_request(format!("malformed request frame: {err}")),
            );
        }
    };

    match state.registry.dispatch(&frame.method, frame.params).await {
        Ok(payload) => ResponseFrame::success(frame.id, payload),
        Err(error) => ResponseFrame::failure(frame.id, error),
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn rpc_handler(
    State(state): State<SharedState>,
    Json(raw): Json<serde_json::Value>,
) -> Json<ResponseFrame> {
    Json(respond(&state, raw).await)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Serve one WebSocket session: requests are answered in arrival order on
/// this connection. Binary frames and pings are left to the protocol layer.
async fn handle_ws_connection(mut socket: WebSocket, state: SharedState) {
    debug!("WebSocket session opened");

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(err) => {
                debug!(error = %err, "WebSocket receive failed, closing session");
                break;
            }
        };

        match message {
            WsMessage::Text(text) => {
                let raw = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
                let response = respond(&state, raw).await;
                let encoded = match serde_json::to_string(&response) {
                    Ok(encoded) => encoded,
                    Err(err) => {
                        debug!(error = %err, "failed to encode response frame");
                        continue;
                    }
                };
                if socket.send(WsMessage::Text(encoded.into())).await.is_err() {
                    break;
                }
            }
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    debug!("WebSocket session closed");
}
