//! # Workview Core
//!
//! Domain types, traits, and error definitions for the Workview context
//! gateway. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The gateway protocol (`protocol::RequestHandler`) and workspace lookup
//! (`workspace::WorkspaceResolver`) are defined as traits here.
//! Implementations live in their respective crates. This enables:
//! - Swapping transports (HTTP, WebSocket, in-process) without touching handlers
//! - Easy testing with static/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod entry;
pub mod error;
pub mod protocol;
pub mod workspace;

// Re-export key types at crate root for ergonomics
pub use entry::{ContextListing, DirectoryEntry, FileContent};
pub use error::ContextError;
pub use protocol::{ErrorCode, ErrorShape, RequestHandler};
pub use workspace::{StaticWorkspaceResolver, Workspace, WorkspaceResolver};
