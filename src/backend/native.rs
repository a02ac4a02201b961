//! Full native-build publisher.
//!
//! Services dispatches that compile native extension modules. The build
//! configuration travels as a deferred hook: the bootstrap reconstructs it
//! inside the interpreter as a configuration callable, so subpackage
//! discovery runs in the build machinery's own process.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context, Result};

use super::{DispatchJob, SetupBackend};
use crate::util::process::ProcessBuilder;

const NATIVE_BOOTSTRAP: &str = r#"
import json, sys

payload = json.load(sys.stdin)
sys.argv = ["setup.py", *payload["argv"]]

if payload["use_setuptools"]:
    # Extended commands must be registered before the build machinery loads.
    import setuptools

from numpy.distutils.core import setup
from numpy.distutils.misc_util import Configuration

cfg = payload["configuration"]

def configuration(parent_package="", top_path=None):
    config = Configuration(None, parent_package, top_path)
    config.set_options(
        ignore_setup_xxx_py=cfg["ignore_setup_scripts"],
        assume_default_configuration=cfg["assume_default_configuration"],
        delegate_options_to_subpackages=cfg["delegate_options_to_subpackages"],
        quiet=cfg["quiet"],
    )
    for name in cfg["subpackages"]:
        config.add_subpackage(name)
    return config

metadata = payload["metadata"]
metadata["configuration"] = configuration
setup(**metadata)
"#;

/// The native-build publisher bound to a host interpreter.
#[derive(Debug, Clone)]
pub struct NativeBackend {
    interpreter: PathBuf,
}

impl NativeBackend {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        NativeBackend {
            interpreter: interpreter.into(),
        }
    }
}

impl SetupBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "numpy.distutils"
    }

    fn supports_native_build(&self) -> bool {
        true
    }

    fn dispatch(&self, job: &DispatchJob<'_>) -> Result<ExitStatus> {
        ProcessBuilder::new(&self.interpreter)
            .arg("-c")
            .arg(NATIVE_BOOTSTRAP)
            .cwd(job.root)
            .stdin(job.payload()?)
            .stream()
            .with_context(|| format!("{} dispatch failed", self.name()))
    }
}
