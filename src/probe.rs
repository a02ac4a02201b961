//! Host environment probing.
//!
//! Locates the host interpreter and reports the installed version of the
//! numeric library. Probes are single best-effort attempts: absence is a
//! normal, reportable outcome here, and the gating layer decides what it
//! means for the current dispatch path.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use semver::Version;

use crate::util::config::SetupConfig;
use crate::util::process::ProcessBuilder;

/// Environment variable overriding interpreter discovery.
pub const INTERPRETER_ENV: &str = "RANKLAB_PYTHON";

/// Interpreter names searched on PATH, in order.
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// One-liner printing the interpreter version as `major.minor.patch`.
const VERSION_SNIPPET: &str = "import sys; print('.'.join(map(str, sys.version_info[:3])))";

/// The host interpreter, located and versioned.
#[derive(Debug, Clone)]
pub struct InterpreterInfo {
    /// Absolute path to the interpreter executable
    pub path: PathBuf,

    /// Interpreter version
    pub version: Version,
}

/// Result of probing for a library in the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbedVersion {
    /// The library is importable and exposes this version
    Present(Version),

    /// The library could not be located
    Absent,
}

/// Locate the host interpreter and read its version.
///
/// Resolution order: `RANKLAB_PYTHON`, the project config override, then
/// `python3`/`python` on PATH.
pub fn find_interpreter(config: &SetupConfig) -> Result<InterpreterInfo> {
    let path = resolve_interpreter_path(config)?;
    let version = interpreter_version(&path)
        .with_context(|| format!("failed to query interpreter version: {}", path.display()))?;

    tracing::debug!(
        "using interpreter {} (version {})",
        path.display(),
        version
    );

    Ok(InterpreterInfo { path, version })
}

fn resolve_interpreter_path(config: &SetupConfig) -> Result<PathBuf> {
    if let Ok(env_path) = std::env::var(INTERPRETER_ENV) {
        let path = PathBuf::from(&env_path);
        if let Some(found) = locate(&path) {
            return Ok(found);
        }
        bail!(
            "interpreter from {} not found: {}",
            INTERPRETER_ENV,
            env_path
        );
    }

    if let Some(ref configured) = config.interpreter.python {
        if let Some(found) = locate(configured) {
            return Ok(found);
        }
        tracing::warn!(
            "configured interpreter not found: {}",
            configured.display()
        );
    }

    for candidate in INTERPRETER_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }

    bail!(
        "no host interpreter found (tried {})",
        INTERPRETER_CANDIDATES.join(", ")
    )
}

/// Resolve a configured interpreter: either an existing path or a name
/// looked up on PATH.
fn locate(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        which::which(path).ok()
    }
}

fn interpreter_version(path: &Path) -> Result<Version> {
    let output = ProcessBuilder::new(path)
        .arg("-c")
        .arg(VERSION_SNIPPET)
        .exec_and_check()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&stdout)
        .with_context(|| format!("unrecognized interpreter version output: {:?}", stdout.trim()))
}

/// Probe the host environment for a numeric library.
///
/// One best-effort attempt: runs the interpreter, imports the library and
/// prints its version attribute. On failure the child's diagnostic output
/// goes to the error stream and the probe reports `Absent` rather than
/// aborting.
pub fn numeric_library(interpreter: &Path, name: &str) -> ProbedVersion {
    let snippet = format!("import {name}; print({name}.__version__)");
    let output = match ProcessBuilder::new(interpreter).arg("-c").arg(&snippet).exec() {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("probe for {} failed to run: {:#}", name, e);
            return ProbedVersion::Absent;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!("probe for {} failed:\n{}", name, stderr.trim_end());
        return ProbedVersion::Absent;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_probe_output(&stdout) {
        Ok(version) => ProbedVersion::Present(version),
        Err(e) => {
            tracing::warn!("probe for {} returned garbage: {:#}", name, e);
            ProbedVersion::Absent
        }
    }
}

/// Parse the first line of probe output as a version, leniently.
fn parse_probe_output(output: &str) -> Result<Version> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    parse_version_lenient(line).with_context(|| format!("cannot parse version from {:?}", line))
}

/// Parse a version string, allowing for incomplete versions.
pub fn parse_version_lenient(s: &str) -> Option<Version> {
    // Try exact parse first
    if let Ok(v) = s.parse() {
        return Some(v);
    }

    // Try adding missing components
    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(Version::new(major, minor, 0))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_lenient() {
        assert_eq!(parse_version_lenient("1"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_version_lenient("1.17"), Some(Version::new(1, 17, 0)));
        assert_eq!(
            parse_version_lenient("1.17.3"),
            Some(Version::new(1, 17, 3))
        );
        assert_eq!(parse_version_lenient("not-a-version"), None);
    }

    #[test]
    fn test_parse_probe_output() {
        assert_eq!(
            parse_probe_output("3.10.12\n").unwrap(),
            Version::new(3, 10, 12)
        );
        assert_eq!(
            parse_probe_output("\n  1.17.3  \n").unwrap(),
            Version::new(1, 17, 3)
        );
        assert!(parse_probe_output("").is_err());
        assert!(parse_probe_output("Traceback (most recent call last):").is_err());
    }
}
