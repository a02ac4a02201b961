//! Configuration file support for ranklab-setup.
//!
//! A distribution may carry an optional `ranklab-setup.toml` at its root to
//! override environment discovery, most usefully the interpreter the
//! orchestrator probes and dispatches to. The `RANKLAB_PYTHON` environment
//! variable takes precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-distribution configuration file.
pub const CONFIG_FILE: &str = "ranklab-setup.toml";

/// Orchestrator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Interpreter settings
    pub interpreter: InterpreterSettings,
}

/// Interpreter discovery overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterSettings {
    /// Path to (or name of) the host interpreter
    pub python: Option<PathBuf>,
}

impl SetupConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or cannot be parsed.
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}
