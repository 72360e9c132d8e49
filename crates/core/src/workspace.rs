//! Workspace resolution — which directory tree a request may browse.
//!
//! A workspace is the single root directory associated with an agent, under
//! which all context files live. Resolution happens once per request and is
//! never cached across requests: the backing configuration may change while
//! the gateway is running.

use std::path::PathBuf;

/// An agent's workspace: the sandbox root for context browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// The agent this workspace belongs to.
    pub agent_id: String,

    /// Absolute root directory. May not exist on disk yet — a fresh agent
    /// that has never run has no workspace, and that is not an error.
    pub root: PathBuf,
}

/// Yields the workspace for the current request, or `None` when no
/// workspace is configured.
///
/// Implementations must be cheap enough to call per request; the
/// config-backed resolver in `workview-config` re-reads configuration on
/// every call so that edits take effect without a restart.
pub trait WorkspaceResolver: Send + Sync {
    fn resolve(&self) -> Option<Workspace>;
}

/// A resolver pinned to one workspace. Used by tests and by embedders that
/// manage configuration themselves.
#[derive(Debug, Clone)]
pub struct StaticWorkspaceResolver {
    workspace: Option<Workspace>,
}

impl StaticWorkspaceResolver {
    pub fn new(agent_id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            workspace: Some(Workspace {
                agent_id: agent_id.into(),
                root: root.into(),
            }),
        }
    }

    /// A resolver that reports no configured workspace.
    pub fn unconfigured() -> Self {
        Self { workspace: None }
    }
}

impl WorkspaceResolver for StaticWorkspaceResolver {
    fn resolve(&self) -> Option<Workspace> {
        self.workspace.clone()
    }
}
