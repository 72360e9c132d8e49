//! Configuration loading, validation, and workspace resolution for Workview.
//!
//! Loads configuration from `~/.workview/config.toml` with environment
//! variable overrides. Validates all settings at load time.
//!
//! Workspace resolution is deliberately per-request: the gateway asks
//! [`ConfigWorkspaceResolver`] on every call, and the resolver re-reads the
//! config file, so edits take effect without restarting the server.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use workview_core::workspace::{Workspace, WorkspaceResolver};

/// The root configuration structure.
///
/// Maps directly to `~/.workview/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agent registry and default-agent selection
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// The agent served when a request names none.
    #[serde(default = "default_agent_id")]
    pub default: String,

    /// Per-agent settings, keyed by agent id.
    #[serde(default)]
    pub entries: HashMap<String, AgentEntry>,
}

fn default_agent_id() -> String {
    "main".into()
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            default: default_agent_id(),
            entries: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentEntry {
    /// Workspace root override for this agent. Tilde-expanded.
    /// Unset means the conventional location under the config dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    43117
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load config from the conventional location, applying environment
    /// variable overrides (highest priority).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(agent) = std::env::var("WORKVIEW_AGENT") {
            config.agents.default = agent;
        }

        if let Ok(workspace) = std::env::var("WORKVIEW_WORKSPACE") {
            let default = config.agents.default.clone();
            config.agents.entries.entry(default).or_default().workspace = Some(workspace);
        }

        if let Ok(port) = std::env::var("WORKVIEW_PORT") {
            config.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("WORKVIEW_PORT is not a port number: {port}"))
            })?;
        }

        Ok(config)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.default.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agents.default must not be empty".into(),
            ));
        }
        if self.gateway.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gateway.host must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs_home().join(".workview")
    }

    /// The default agent's conventional workspace directory.
    pub fn workspace_dir() -> PathBuf {
        Self::config_dir().join("workspace")
    }

    /// The id of the agent served when a request names none.
    pub fn resolve_default_agent_id(&self) -> String {
        self.agents.default.clone()
    }

    /// The workspace root for `agent_id`, or `None` when that agent is not
    /// configured. The returned directory may not exist on disk — a fresh
    /// agent has no workspace yet, and that is a legitimate state.
    pub fn resolve_agent_workspace_dir(&self, agent_id: &str) -> Option<PathBuf> {
        if let Some(entry) = self.agents.entries.get(agent_id) {
            if let Some(workspace) = &entry.workspace {
                return Some(PathBuf::from(expand_tilde(workspace)));
            }
            return Some(self.conventional_workspace(agent_id));
        }
        if agent_id == self.agents.default {
            return Some(self.conventional_workspace(agent_id));
        }
        None
    }

    fn conventional_workspace(&self, agent_id: &str) -> PathBuf {
        if agent_id == self.agents.default {
            Self::workspace_dir()
        } else {
            Self::config_dir().join("agents").join(agent_id).join("workspace")
        }
    }
}

/// Expand ~ to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") || path == "~" {
        return path.replacen('~', &dirs_home().to_string_lossy(), 1);
    }
    path.to_string()
}

fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        PathBuf::from(std::env::var("USERPROFILE").unwrap_or_else(|_| ".".into()))
    }
    #[cfg(not(target_os = "windows"))]
    {
        PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()))
    }
}

/// Resolves the default agent's workspace by reloading configuration on
/// every call. Load failures degrade to "no workspace" with a warning
/// rather than failing the request.
#[derive(Debug, Clone, Default)]
pub struct ConfigWorkspaceResolver;

impl ConfigWorkspaceResolver {
    pub fn new() -> Self {
        Self
    }
}

impl WorkspaceResolver for ConfigWorkspaceResolver {
    fn resolve(&self) -> Option<Workspace> {
        let config = match AppConfig::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config, treating workspace as unconfigured");
                return None;
            }
        };
        let agent_id = config.resolve_default_agent_id();
        let root = config.resolve_agent_workspace_dir(&agent_id)?;
        Some(Workspace { agent_id, root })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
