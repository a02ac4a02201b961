//! Minimal metadata publisher.
//!
//! Services every dispatch that only needs the descriptive metadata record.
//! Comes in two flavors: the extended one (setuptools) when the environment
//! provides it, and the interpreter's core machinery as the fallback. The
//! fallback cannot service the extended command set; that selection rule
//! lives in the orchestrator.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context, Result};

use super::{DispatchJob, SetupBackend};
use crate::util::process::ProcessBuilder;

/// Bootstrap for the extended flavor.
const SETUPTOOLS_BOOTSTRAP: &str = r#"
import json, sys

payload = json.load(sys.stdin)
sys.argv = ["setup.py", *payload["argv"]]

from setuptools import setup

setup(**payload["metadata"])
"#;

/// Bootstrap for the core fallback flavor.
const DISTUTILS_BOOTSTRAP: &str = r#"
import json, sys

payload = json.load(sys.stdin)
sys.argv = ["setup.py", *payload["argv"]]

from distutils.core import setup

setup(**payload["metadata"])
"#;

/// Which flavor of the metadata publisher to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreFlavor {
    /// Extended publisher with the full command set
    Setuptools,

    /// The interpreter's core packaging machinery
    Distutils,
}

impl CoreFlavor {
    fn bootstrap(&self) -> &'static str {
        match self {
            CoreFlavor::Setuptools => SETUPTOOLS_BOOTSTRAP,
            CoreFlavor::Distutils => DISTUTILS_BOOTSTRAP,
        }
    }
}

/// The metadata publisher bound to a host interpreter.
#[derive(Debug, Clone)]
pub struct CoreBackend {
    interpreter: PathBuf,
    flavor: CoreFlavor,
}

impl CoreBackend {
    pub fn new(interpreter: impl Into<PathBuf>, flavor: CoreFlavor) -> Self {
        CoreBackend {
            interpreter: interpreter.into(),
            flavor,
        }
    }

    /// The flavor this publisher runs.
    pub fn flavor(&self) -> CoreFlavor {
        self.flavor
    }
}

impl SetupBackend for CoreBackend {
    fn name(&self) -> &'static str {
        match self.flavor {
            CoreFlavor::Setuptools => "setuptools",
            CoreFlavor::Distutils => "distutils",
        }
    }

    fn supports_native_build(&self) -> bool {
        false
    }

    fn dispatch(&self, job: &DispatchJob<'_>) -> Result<ExitStatus> {
        ProcessBuilder::new(&self.interpreter)
            .arg("-c")
            .arg(self.flavor.bootstrap())
            .cwd(job.root)
            .stdin(job.payload()?)
            .stream()
            .with_context(|| format!("{} dispatch failed", self.name()))
    }
}
