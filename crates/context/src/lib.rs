//! Sandboxed read-only file browsing over an agent's workspace.
//!
//! Two gateway operations compose a minimal virtual-filesystem facade over
//! one real directory tree:
//!
//! - `context.list` — direct children of one directory, filtered and sorted
//! - `context.read` — whole-file UTF-8 content, gated by type and size
//!
//! The security boundary of the whole subsystem is [`path_guard`]: every
//! accepted path must resolve, after lexical normalization, to the workspace
//! root or a descendant of it — under `..` segments and absolute-path
//! injection alike. [`filter`] and [`gate`] keep noise and binaries out of a
//! viewer meant for human/agent-authored context files.

pub mod filter;
pub mod gate;
pub mod handlers;
pub mod path_guard;
pub mod service;

pub use handlers::{ContextListHandler, ContextReadHandler, context_handlers};
pub use service::ContextService;
