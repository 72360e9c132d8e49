//! Wire types for the context browsing operations.
//!
//! These are the JSON payload shapes consumed by the remote UI. Field names
//! serialize in camelCase to match the browser-side contract. All values are
//! ephemeral — recomputed from the filesystem on every call, never cached.

use serde::{Deserialize, Serialize};

/// One child of a listed directory, as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// Bare entry name (no path separators).
    pub name: String,

    /// Workspace-rooted relative path of the entry.
    pub path: String,

    /// Size in bytes. 0 when the entry could not be stat'ed.
    pub size: u64,

    /// Modification time, milliseconds since the Unix epoch.
    /// Falls back to the current time when the entry could not be stat'ed.
    pub modified_at: i64,

    /// Whether the entry is a directory (symlinks are not followed).
    pub is_directory: bool,
}

/// Result payload of `context.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextListing {
    /// The workspace root — always the root, never the queried
    /// subdirectory. Callers reconstruct browsed paths from breadcrumbs.
    pub path: String,

    /// Direct children of the listed directory, directories first.
    pub entries: Vec<DirectoryEntry>,
}

impl ContextListing {
    /// A listing with no entries, for workspaces or directories that do not
    /// exist (yet). A missing workspace is a legitimate state, not an error.
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }
}

/// Result payload of `context.read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// The relative path exactly as the caller requested it.
    pub path: String,

    /// Whole-file content decoded as UTF-8.
    pub content: String,

    /// Size in bytes, as stat'ed before the read.
    pub size: u64,

    /// Modification time, milliseconds since the Unix epoch.
    pub modified_at: i64,
}
