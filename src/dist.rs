//! Static configuration for the ranklab distribution.
//!
//! Everything the orchestrator needs to know about the distributable unit
//! lives in [`DistConfig`]: metadata constants, the package namespace, the
//! interpreter floor and the numeric-library version constraints. The struct
//! is built once at process start and passed down; nothing here is mutated
//! after construction.

use std::collections::BTreeMap;

use semver::Version;

/// Name of the distributable unit.
pub const DIST_NAME: &str = "ranklab";

/// Directory holding the package namespace, relative to the distribution root.
pub const PACKAGE_DIR: &str = "ranklab";

/// File whose presence marks a release distribution rather than a
/// development checkout.
pub const RELEASE_MARKER: &str = "PKG-INFO";

/// Stale manifest file removed before full builds.
pub const MANIFEST_FILE: &str = "MANIFEST";

/// README consumed as the long description.
pub const README_FILE: &str = "README.md";

/// A named dependency with a minimum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    /// Library name as the host interpreter imports it
    pub name: String,

    /// Minimum acceptable version
    pub minimum: Version,
}

impl VersionConstraint {
    /// Create a new constraint.
    pub fn new(name: impl Into<String>, minimum: Version) -> Self {
        VersionConstraint {
            name: name.into(),
            minimum,
        }
    }

    /// Render as an install requirement (`name>=x.y.z`).
    pub fn requirement(&self) -> String {
        format!("{}>={}", self.name, self.minimum)
    }
}

/// Immutable distribution configuration, constructed once per run.
#[derive(Debug, Clone)]
pub struct DistConfig {
    /// Distribution name
    pub name: String,

    /// Package namespace directory under the distribution root
    pub package_dir: String,

    /// Short description
    pub description: String,

    /// Maintainer contact
    pub maintainer: String,
    pub maintainer_email: String,

    /// Project URLs
    pub url: String,
    pub download_url: String,
    pub project_urls: BTreeMap<String, String>,

    /// License identifier
    pub license: String,

    /// Trove-style classifier tags
    pub classifiers: Vec<String>,

    /// Minimum host interpreter version (major, minor)
    pub interpreter_floor: (u64, u64),

    /// Numeric library gated before native builds
    pub numeric: VersionConstraint,

    /// Scientific library declared as a dependency but not gated
    pub scientific: VersionConstraint,
}

impl DistConfig {
    /// The standard configuration for the ranklab distribution.
    pub fn standard() -> Self {
        let project_urls = BTreeMap::from([
            (
                "Bug Tracker".to_string(),
                "https://github.com/ranklab/ranklab/issues".to_string(),
            ),
            (
                "Source Code".to_string(),
                "https://github.com/ranklab/ranklab".to_string(),
            ),
        ]);

        DistConfig {
            name: DIST_NAME.to_string(),
            package_dir: PACKAGE_DIR.to_string(),
            description: "A set of modules for label ranking problems.".to_string(),
            maintainer: "Ranklab Developers".to_string(),
            maintainer_email: "maintainers@ranklab.org".to_string(),
            url: "https://github.com/ranklab/ranklab".to_string(),
            download_url: "https://pypi.org/project/ranklab/#files".to_string(),
            project_urls,
            license: "MIT".to_string(),
            classifiers: [
                "Development Status :: 5 - Production/Stable",
                "Intended Audience :: Science/Research",
                "License :: OSI Approved :: MIT License",
                "Operating System :: MacOS :: MacOS X",
                "Operating System :: POSIX :: Linux",
                "Operating System :: Unix",
                "Programming Language :: C",
                "Programming Language :: C++",
                "Programming Language :: Python :: 3.6",
                "Programming Language :: Python :: 3.7",
                "Programming Language :: Python :: 3.8",
                "Topic :: Scientific/Engineering :: Artificial Intelligence",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            interpreter_floor: (3, 6),
            numeric: VersionConstraint::new("numpy", Version::new(1, 17, 3)),
            scientific: VersionConstraint::new("scipy", Version::new(1, 3, 2)),
        }
    }

    /// The dependency-constraint list carried in the distribution metadata.
    pub fn install_requires(&self) -> Vec<String> {
        vec![self.numeric.requirement(), self.scientific.requirement()]
    }

    /// The interpreter floor rendered as `major.minor`.
    pub fn interpreter_floor_display(&self) -> String {
        format!("{}.{}", self.interpreter_floor.0, self.interpreter_floor.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_requires() {
        let dist = DistConfig::standard();
        assert_eq!(
            dist.install_requires(),
            vec!["numpy>=1.17.3".to_string(), "scipy>=1.3.2".to_string()]
        );
    }

    #[test]
    fn test_requirement_format() {
        let constraint = VersionConstraint::new("numpy", Version::new(1, 17, 3));
        assert_eq!(constraint.requirement(), "numpy>=1.17.3");
    }

    #[test]
    fn test_interpreter_floor_display() {
        let dist = DistConfig::standard();
        assert_eq!(dist.interpreter_floor_display(), "3.6");
    }
}
