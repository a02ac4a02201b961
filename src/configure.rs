//! Native-build configuration assembly.
//!
//! Runs only on the full-build path, after gating. Produces the
//! configuration the native backend attaches to the dispatch as its
//! deferred configuration hook.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::dist::{DistConfig, MANIFEST_FILE};
use crate::util::fs::remove_file_if_exists;

/// Build configuration for the compiled-extension path.
///
/// Scoped to the distribution root; nested packages supply their own build
/// rules rather than being centrally enumerated here.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionConfig {
    /// Registered top-level subpackages
    pub subpackages: Vec<String>,

    /// Suppress configuration chatter in normal runs
    pub quiet: bool,

    /// Skip per-directory setup scripts during discovery
    pub ignore_setup_scripts: bool,

    /// Accept the default configuration where none is declared
    pub assume_default_configuration: bool,

    /// Nested packages own their build options
    pub delegate_options_to_subpackages: bool,
}

impl ExtensionConfig {
    /// Assemble the configuration for a distribution rooted at `root`.
    ///
    /// Removes a stale top-level manifest first so the build regenerates it;
    /// a leftover manifest can silently omit newly added files.
    pub fn assemble(dist: &DistConfig, root: &Path) -> Result<Self> {
        let manifest = root.join(MANIFEST_FILE);
        if remove_file_if_exists(&manifest)? {
            tracing::debug!("removed stale manifest: {}", manifest.display());
        }

        Ok(ExtensionConfig {
            subpackages: vec![dist.package_dir.clone()],
            quiet: true,
            ignore_setup_scripts: true,
            assume_default_configuration: true,
            delegate_options_to_subpackages: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_assemble_registers_single_subpackage() {
        let tmp = TempDir::new().unwrap();
        let dist = DistConfig::standard();

        let config = ExtensionConfig::assemble(&dist, tmp.path()).unwrap();

        assert_eq!(config.subpackages, vec!["ranklab".to_string()]);
        assert!(config.quiet);
        assert!(config.delegate_options_to_subpackages);
    }

    #[test]
    fn test_assemble_removes_stale_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("MANIFEST"), "stale\n").unwrap();

        let dist = DistConfig::standard();
        ExtensionConfig::assemble(&dist, tmp.path()).unwrap();

        assert!(!tmp.path().join("MANIFEST").exists());
    }

    #[test]
    fn test_assemble_without_manifest_is_fine() {
        let tmp = TempDir::new().unwrap();
        let dist = DistConfig::standard();
        assert!(ExtensionConfig::assemble(&dist, tmp.path()).is_ok());
    }
}
