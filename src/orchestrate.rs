//! The setup orchestrator.
//!
//! Single entry point for one invocation: classifies intent, enforces the
//! full-build gates, assembles the metadata and build configuration, and
//! hands off to the selected packaging backend. A successful dispatch
//! delegates the exit status to the underlying machinery.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{bail, Result};

use crate::backend::{BackendSet, DispatchJob, SetupBackend};
use crate::clean::ArtifactCleaner;
use crate::configure::ExtensionConfig;
use crate::descriptor::PackageDescriptor;
use crate::dist::DistConfig;
use crate::gate;
use crate::intent::{IntentClass, InvocationIntent};
use crate::probe;
use crate::util::config::SetupConfig;

pub struct SetupOrchestrator {
    dist: DistConfig,
    root: PathBuf,
    config: SetupConfig,
}

impl SetupOrchestrator {
    /// Create an orchestrator for a distribution rooted at `root`.
    pub fn new(dist: DistConfig, root: PathBuf) -> Self {
        let config = SetupConfig::load_or_default(&root);
        SetupOrchestrator { dist, root, config }
    }

    /// Run one classified invocation to completion.
    ///
    /// Returns the process exit code: the cleaner's on the clean path, the
    /// packaging child's on the dispatch paths.
    pub fn dispatch(&self, intent: &InvocationIntent) -> Result<i32> {
        match intent.class() {
            IntentClass::Clean => self.clean(),
            IntentClass::MetadataOnly => self.dispatch_metadata(intent),
            IntentClass::FullBuild => self.dispatch_full_build(intent),
        }
    }

    /// Alternative terminal path: artifact cleanup instead of either build
    /// path. Needs no interpreter and no gating.
    fn clean(&self) -> Result<i32> {
        let cleaner = ArtifactCleaner::new(&self.root, self.dist.package_dir.clone());
        let removed = cleaner.run()?;
        eprintln!("     Removed {} build artifact(s)", removed);
        Ok(0)
    }

    /// Metadata-only path: no prerequisite gating, basic publisher.
    fn dispatch_metadata(&self, intent: &InvocationIntent) -> Result<i32> {
        let interpreter = probe::find_interpreter(&self.config)?;
        let backends = BackendSet::detect(&interpreter.path);

        if intent.needs_setuptools() && !backends.setuptools {
            bail!(
                "the `{}` command needs the extended packaging mechanism, \
                 which is not importable in {}",
                intent.requested_command().unwrap_or_default(),
                interpreter.path.display()
            );
        }

        let publisher = backends.metadata_publisher(&interpreter.path);
        tracing::debug!("dispatching metadata-only run via {}", publisher.name());

        let descriptor = PackageDescriptor::assemble(&self.dist, &self.root)?;
        let job = DispatchJob {
            root: &self.root,
            descriptor: &descriptor,
            configuration: None,
            args: intent.args(),
            use_setuptools: intent.needs_setuptools(),
        };

        let status = publisher.dispatch(&job)?;
        Ok(exit_code(status))
    }

    /// Full-build path: gates first, then the native publisher. The gates
    /// run in a fixed order and the first failure aborts the run; no
    /// partial build is attempted.
    fn dispatch_full_build(&self, intent: &InvocationIntent) -> Result<i32> {
        let interpreter = probe::find_interpreter(&self.config)?;

        let accepted = gate::enforce(&self.dist, &interpreter, || {
            probe::numeric_library(&interpreter.path, &self.dist.numeric.name)
        })?;
        tracing::debug!(
            "{} {} satisfies >={}",
            self.dist.numeric.name,
            accepted,
            self.dist.numeric.minimum
        );

        let backends = BackendSet::detect(&interpreter.path);
        let Some(publisher) = backends.native_publisher(&interpreter.path) else {
            // Gating already proved the numeric library imports; no
            // fallback publisher exists on this path.
            bail!(
                "the native build backend is not importable in {} even though \
                 {} {} was detected; the environment is inconsistent",
                interpreter.path.display(),
                self.dist.numeric.name,
                accepted
            );
        };

        let descriptor = PackageDescriptor::assemble(&self.dist, &self.root)?;
        let configuration = ExtensionConfig::assemble(&self.dist, &self.root)?;
        let job = DispatchJob {
            root: &self.root,
            descriptor: &descriptor,
            configuration: Some(&configuration),
            args: intent.args(),
            use_setuptools: intent.needs_setuptools(),
        };

        let status = publisher.dispatch(&job)?;
        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
