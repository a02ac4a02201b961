//! Distribution metadata assembly.
//!
//! [`PackageDescriptor`] is the static record describing the distributable
//! unit. It is constructed once per run from the immutable configuration
//! plus two derived values: the version scraped from the package's own
//! version attribute and the long description read from the README.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::dist::{DistConfig, README_FILE};
use crate::util::fs::read_to_string;

/// Immutable metadata record for the distributable unit.
///
/// Field names follow the wire format consumed by the packaging backends.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub long_description: String,
    pub long_description_content_type: String,
    pub maintainer: String,
    pub maintainer_email: String,
    pub url: String,
    pub download_url: String,
    pub project_urls: BTreeMap<String, String>,
    pub license: String,
    pub classifiers: Vec<String>,
    pub install_requires: Vec<String>,
}

impl PackageDescriptor {
    /// Assemble the descriptor for a distribution rooted at `root`.
    pub fn assemble(dist: &DistConfig, root: &Path) -> Result<Self> {
        let version = read_package_version(root, &dist.package_dir)?;
        let long_description = read_to_string(&root.join(README_FILE))
            .context("distribution README is required for the long description")?;

        Ok(PackageDescriptor {
            name: dist.name.clone(),
            version,
            description: dist.description.clone(),
            long_description,
            long_description_content_type: "text/markdown".to_string(),
            maintainer: dist.maintainer.clone(),
            maintainer_email: dist.maintainer_email.clone(),
            url: dist.url.clone(),
            download_url: dist.download_url.clone(),
            project_urls: dist.project_urls.clone(),
            license: dist.license.clone(),
            classifiers: dist.classifiers.clone(),
            install_requires: dist.install_requires(),
        })
    }
}

/// Read the package's exposed version attribute from its namespace init
/// file (`__version__ = "x.y.z"`).
pub fn read_package_version(root: &Path, package_dir: &str) -> Result<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| {
        Regex::new(r#"(?m)^__version__\s*=\s*["']([^"']+)["']"#).expect("valid regex")
    });

    let init_path = root.join(package_dir).join("__init__.py");
    let contents = read_to_string(&init_path)?;

    let captures = re.captures(&contents).with_context(|| {
        format!(
            "no __version__ attribute found in {}",
            init_path.display()
        )
    })?;

    Ok(captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scaffold(version_line: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("ranklab");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("__init__.py"),
            format!("\"\"\"Top-level package.\"\"\"\n\n{}\n", version_line),
        )
        .unwrap();
        fs::write(tmp.path().join("README.md"), "# ranklab\n\nLabel ranking.\n").unwrap();
        tmp
    }

    #[test]
    fn test_read_package_version() {
        let tmp = scaffold("__version__ = \"0.4.1\"");
        assert_eq!(
            read_package_version(tmp.path(), "ranklab").unwrap(),
            "0.4.1"
        );
    }

    #[test]
    fn test_read_package_version_single_quotes() {
        let tmp = scaffold("__version__ = '1.0.0.dev0'");
        assert_eq!(
            read_package_version(tmp.path(), "ranklab").unwrap(),
            "1.0.0.dev0"
        );
    }

    #[test]
    fn test_missing_version_attribute() {
        let tmp = scaffold("VERSION_INFO = (0, 4)");
        assert!(read_package_version(tmp.path(), "ranklab").is_err());
    }

    #[test]
    fn test_assemble() {
        let tmp = scaffold("__version__ = \"0.4.1\"");
        let dist = DistConfig::standard();
        let descriptor = PackageDescriptor::assemble(&dist, tmp.path()).unwrap();

        assert_eq!(descriptor.name, "ranklab");
        assert_eq!(descriptor.version, "0.4.1");
        assert!(descriptor.long_description.contains("Label ranking"));
        assert_eq!(descriptor.long_description_content_type, "text/markdown");
        assert_eq!(
            descriptor.install_requires,
            vec!["numpy>=1.17.3", "scipy>=1.3.2"]
        );
    }

    #[test]
    fn test_assemble_requires_readme() {
        let tmp = scaffold("__version__ = \"0.4.1\"");
        fs::remove_file(tmp.path().join("README.md")).unwrap();

        let dist = DistConfig::standard();
        assert!(PackageDescriptor::assemble(&dist, tmp.path()).is_err());
    }
}
