//! Build artifact cleanup.
//!
//! Restores a clean working tree without destroying anything needed to
//! reproduce a release build. Generated sources are only removed when their
//! template sibling still exists; release distributions ship generated
//! sources without templates, so the whole generated-source pass is
//! suppressed when the release marker is present.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::dist::RELEASE_MARKER;
use crate::util::fs::{remove_dir_all_if_exists, remove_file_if_exists};

/// Extensions marking a compiled-intermediate source file.
pub const GENERATED_EXTENSIONS: &[&str] = &["c", "cpp"];

/// Extension of the hand-written template a generated file is produced from.
pub const TEMPLATE_EXTENSION: &str = "pyx";

/// Directory names removed wherever they appear under the package tree.
pub const CACHE_DIR_NAMES: &[&str] = &["__pycache__", ".pytest_cache"];

/// Top-level build output directory.
pub const BUILD_DIR: &str = "build";

/// Top-level test cache directory.
pub const TEST_CACHE_DIR: &str = ".pytest_cache";

/// Scratch subdirectories removed by the generic clean step.
const COMMON_SCRATCH_DIRS: &[&str] = &["temp", "lib", "bdist", "scripts"];

/// One candidate for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupTarget {
    /// A directory removed with its contents
    Directory(PathBuf),

    /// A generated source file, eligible only because its template sibling
    /// still exists
    GeneratedSource { path: PathBuf, template: PathBuf },
}

impl CleanupTarget {
    /// Path this target would remove.
    pub fn path(&self) -> &Path {
        match self {
            CleanupTarget::Directory(path) => path,
            CleanupTarget::GeneratedSource { path, .. } => path,
        }
    }
}

/// Walks the distribution tree and removes generated build artifacts.
pub struct ArtifactCleaner {
    root: PathBuf,
    package_dir: String,
}

impl ArtifactCleaner {
    /// Create a cleaner for a distribution rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, package_dir: impl Into<String>) -> Self {
        ArtifactCleaner {
            root: root.into(),
            package_dir: package_dir.into(),
        }
    }

    /// Whether this checkout is a release distribution.
    ///
    /// Release tarballs ship generated sources without their templates, so
    /// generated-source removal is suppressed for them.
    pub fn is_release_distribution(&self) -> bool {
        self.root.join(RELEASE_MARKER).exists()
    }

    /// Run the full cleanup: generic scratch directories first, then the
    /// package-specific plan. Idempotent; missing targets are not errors.
    ///
    /// Returns the number of targets actually removed.
    pub fn run(&self) -> Result<usize> {
        self.common_clean()?;

        let mut removed = 0;
        for target in self.plan()? {
            if self.execute(&target)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Generic clean step: standard build-tool scratch directories.
    ///
    /// Runs before the package-specific pass so later steps do not need to
    /// re-check these locations.
    fn common_clean(&self) -> Result<()> {
        let build = self.root.join(BUILD_DIR);
        for scratch in COMMON_SCRATCH_DIRS {
            remove_dir_all_if_exists(&build.join(scratch))?;
        }
        Ok(())
    }

    /// Collect the package-specific removal candidates.
    pub fn plan(&self) -> Result<Vec<CleanupTarget>> {
        let mut targets = vec![
            CleanupTarget::Directory(self.root.join(BUILD_DIR)),
            CleanupTarget::Directory(self.root.join(TEST_CACHE_DIR)),
        ];

        let keep_generated = self.is_release_distribution();
        let package_root = self.root.join(&self.package_dir);
        if !package_root.exists() {
            return Ok(targets);
        }

        for entry in WalkDir::new(&package_root) {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy();
                if CACHE_DIR_NAMES.contains(&name.as_ref()) {
                    targets.push(CleanupTarget::Directory(path.to_path_buf()));
                }
                continue;
            }

            if keep_generated {
                continue;
            }

            let is_generated = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| GENERATED_EXTENSIONS.contains(&ext));
            if !is_generated {
                continue;
            }

            // Only remove generated files that can be regenerated, i.e. the
            // template with the same stem still sits next to them.
            let template = path.with_extension(TEMPLATE_EXTENSION);
            if template.exists() {
                targets.push(CleanupTarget::GeneratedSource {
                    path: path.to_path_buf(),
                    template,
                });
            }
        }

        Ok(targets)
    }

    /// Execute one removal. Returns whether anything was removed.
    fn execute(&self, target: &CleanupTarget) -> Result<bool> {
        match target {
            CleanupTarget::Directory(path) => {
                if path.exists() {
                    remove_dir_all_if_exists(path)?;
                    tracing::debug!("removed directory: {}", path.display());
                    return Ok(true);
                }
                Ok(false)
            }
            CleanupTarget::GeneratedSource { path, .. } => {
                let removed = remove_file_if_exists(path)?;
                if removed {
                    tracing::debug!("removed generated source: {}", path.display());
                }
                Ok(removed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scaffold() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("ranklab");
        fs::create_dir_all(pkg.join("metrics")).unwrap();

        // Generated pair: template + generated output
        fs::write(pkg.join("ranking.pyx"), "# template").unwrap();
        fs::write(pkg.join("ranking.c"), "/* generated */").unwrap();

        // Generated C++ pair, nested one level down
        fs::write(pkg.join("metrics/tau.pyx"), "# template").unwrap();
        fs::write(pkg.join("metrics/tau.cpp"), "/* generated */").unwrap();

        // Orphan generated file without a template sibling
        fs::write(pkg.join("legacy.c"), "/* only copy */").unwrap();

        // Hand-written source that merely shares an extension family
        fs::write(pkg.join("metrics/helpers.py"), "pass").unwrap();

        // Caches at several depths
        fs::create_dir_all(pkg.join("__pycache__")).unwrap();
        fs::write(pkg.join("__pycache__/ranking.pyc"), "bytecode").unwrap();
        fs::create_dir_all(pkg.join("metrics/.pytest_cache/v")).unwrap();
        fs::write(pkg.join("metrics/.pytest_cache/v/data"), "cache").unwrap();

        // Top-level build output and test cache
        fs::create_dir_all(tmp.path().join("build/temp")).unwrap();
        fs::write(tmp.path().join("build/temp/obj.o"), "obj").unwrap();
        fs::create_dir_all(tmp.path().join(".pytest_cache")).unwrap();

        tmp
    }

    fn cleaner(tmp: &TempDir) -> ArtifactCleaner {
        ArtifactCleaner::new(tmp.path(), "ranklab")
    }

    #[test]
    fn test_removes_generated_sources_with_templates() {
        let tmp = scaffold();
        cleaner(&tmp).run().unwrap();

        let pkg = tmp.path().join("ranklab");
        assert!(!pkg.join("ranking.c").exists());
        assert!(!pkg.join("metrics/tau.cpp").exists());

        // Templates always survive
        assert!(pkg.join("ranking.pyx").exists());
        assert!(pkg.join("metrics/tau.pyx").exists());
    }

    #[test]
    fn test_keeps_generated_sources_without_templates() {
        let tmp = scaffold();
        cleaner(&tmp).run().unwrap();

        assert!(tmp.path().join("ranklab/legacy.c").exists());
    }

    #[test]
    fn test_release_marker_suppresses_generated_removal() {
        let tmp = scaffold();
        fs::write(tmp.path().join("PKG-INFO"), "Metadata-Version: 1.0").unwrap();

        cleaner(&tmp).run().unwrap();

        let pkg = tmp.path().join("ranklab");
        assert!(pkg.join("ranking.c").exists());
        assert!(pkg.join("metrics/tau.cpp").exists());

        // Caches and build output still go
        assert!(!pkg.join("__pycache__").exists());
        assert!(!tmp.path().join("build").exists());
    }

    #[test]
    fn test_removes_cache_directories_at_any_depth() {
        let tmp = scaffold();
        cleaner(&tmp).run().unwrap();

        let pkg = tmp.path().join("ranklab");
        assert!(!pkg.join("__pycache__").exists());
        assert!(!pkg.join("metrics/.pytest_cache").exists());

        // Differently-named directories are untouched
        assert!(pkg.join("metrics").exists());
    }

    #[test]
    fn test_removes_top_level_build_and_test_cache() {
        let tmp = scaffold();
        cleaner(&tmp).run().unwrap();

        assert!(!tmp.path().join("build").exists());
        assert!(!tmp.path().join(".pytest_cache").exists());
    }

    #[test]
    fn test_untouched_files_survive() {
        let tmp = scaffold();
        cleaner(&tmp).run().unwrap();

        assert!(tmp.path().join("ranklab/metrics/helpers.py").exists());
    }

    #[test]
    fn test_idempotent() {
        let tmp = scaffold();
        let cleaner = cleaner(&tmp);

        let first = cleaner.run().unwrap();
        assert!(first > 0);

        // Second run removes nothing and raises no errors
        let second = cleaner.run().unwrap();
        assert_eq!(second, 0);
    }

    #[test]
    fn test_missing_package_dir_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let cleaner = ArtifactCleaner::new(tmp.path(), "ranklab");
        assert_eq!(cleaner.run().unwrap(), 0);
    }

    #[test]
    fn test_plan_lists_template_for_generated_sources() {
        let tmp = scaffold();
        let plan = cleaner(&tmp).plan().unwrap();

        let generated: Vec<_> = plan
            .iter()
            .filter_map(|t| match t {
                CleanupTarget::GeneratedSource { path, template } => Some((path, template)),
                _ => None,
            })
            .collect();

        assert_eq!(generated.len(), 2);
        for (path, template) in generated {
            assert_eq!(path.with_extension("pyx"), *template);
        }
    }
}
