//! Packaging dispatch behind a capability interface.
//!
//! The orchestrator never talks to the interpreter-side packaging machinery
//! directly. It selects a [`SetupBackend`] — the minimal metadata publisher
//! or the full native-build publisher — based on a capability check run once
//! before dispatch, and hands it a [`DispatchJob`]. Backends feed a small
//! bootstrap program to the interpreter with the job payload on stdin, and
//! the child's exit status becomes the run's exit status.

mod core;
mod native;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::Result;
use serde_json::json;

use crate::configure::ExtensionConfig;
use crate::descriptor::PackageDescriptor;
use crate::util::process::ProcessBuilder;

pub use self::core::{CoreBackend, CoreFlavor};
pub use self::native::NativeBackend;

/// One packaging dispatch: the assembled metadata, the optional native
/// build configuration, and the arguments forwarded to the backend.
#[derive(Debug)]
pub struct DispatchJob<'a> {
    /// Distribution root the backend runs in
    pub root: &'a Path,

    /// Assembled distribution metadata
    pub descriptor: &'a PackageDescriptor,

    /// Native build configuration, full-build path only
    pub configuration: Option<&'a ExtensionConfig>,

    /// Arguments forwarded to the packaging machinery
    pub args: &'a [String],

    /// Whether the requested command needs the extended command set
    pub use_setuptools: bool,
}

impl DispatchJob<'_> {
    /// Serialize the job for the interpreter-side bootstrap.
    pub fn payload(&self) -> Result<Vec<u8>> {
        let payload = json!({
            "metadata": self.descriptor,
            "configuration": self.configuration,
            "argv": self.args,
            "use_setuptools": self.use_setuptools,
        });
        Ok(serde_json::to_vec(&payload)?)
    }
}

/// A packaging mechanism capable of servicing a dispatch.
pub trait SetupBackend {
    /// Backend name for messages.
    fn name(&self) -> &'static str;

    /// Whether this backend can compile native extension modules.
    fn supports_native_build(&self) -> bool;

    /// Hand the job to the interpreter-side packaging machinery.
    fn dispatch(&self, job: &DispatchJob<'_>) -> Result<ExitStatus>;
}

/// Which packaging mechanisms the host environment provides.
///
/// Detected once before dispatch; selection logic reads these flags instead
/// of re-probing the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSet {
    /// The extended metadata publisher is importable
    pub setuptools: bool,

    /// The native-build publisher is importable
    pub native: bool,
}

impl BackendSet {
    /// Probe the interpreter for the available packaging mechanisms.
    pub fn detect(interpreter: &Path) -> Self {
        let set = BackendSet {
            setuptools: importable(interpreter, "setuptools"),
            native: importable(interpreter, "numpy.distutils.core"),
        };
        tracing::debug!(
            "backend capabilities: setuptools={}, native={}",
            set.setuptools,
            set.native
        );
        set
    }

    /// The metadata publisher for this environment: the extended flavor when
    /// importable, the interpreter's core machinery otherwise.
    pub fn metadata_flavor(&self) -> CoreFlavor {
        if self.setuptools {
            CoreFlavor::Setuptools
        } else {
            CoreFlavor::Distutils
        }
    }

    /// The metadata publisher bound to an interpreter.
    pub fn metadata_publisher(&self, interpreter: impl Into<PathBuf>) -> CoreBackend {
        CoreBackend::new(interpreter, self.metadata_flavor())
    }

    /// The native-build publisher, if the environment provides one.
    pub fn native_publisher(&self, interpreter: impl Into<PathBuf>) -> Option<NativeBackend> {
        self.native.then(|| NativeBackend::new(interpreter))
    }
}

/// Whether a module is importable in the given interpreter.
fn importable(interpreter: &Path, module: &str) -> bool {
    ProcessBuilder::new(interpreter)
        .arg("-c")
        .arg(format!("import {module}"))
        .exec()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
