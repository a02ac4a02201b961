//! Prerequisite gates for the full-build path.
//!
//! Implements the "Actionable Error Messages" rule: every gate failure
//! reports the detected value, the required value and, for the interpreter
//! case, the interpreter's location. All three failures are fatal and
//! permanent until the environment is fixed; there are no retries.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use semver::Version;
use thiserror::Error;

use crate::dist::DistConfig;
use crate::probe::{InterpreterInfo, ProbedVersion};

/// Fatal prerequisite failures, full-build path only.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GateError {
    /// Host interpreter below the minimum version.
    #[error(
        "{dist} requires an interpreter version {required} or later. \
         The current version is {found}, installed in {location}.",
        location = .interpreter.display()
    )]
    #[diagnostic(
        code(ranklab_setup::gate::environment_too_old),
        help("Upgrade the interpreter or point RANKLAB_PYTHON at a newer one")
    )]
    EnvironmentTooOld {
        dist: String,
        found: Version,
        required: String,
        interpreter: PathBuf,
    },

    /// Required numeric library not found.
    #[error("{name} is not installed. At least version {required} is required.")]
    #[diagnostic(
        code(ranklab_setup::gate::missing_dependency),
        help("Install the library into the interpreter the build will use")
    )]
    MissingDependency { name: String, required: Version },

    /// Found but below the minimum version.
    #[error(
        "Your installation of {name} is not the required. \
         Got {found} but requires >={required}."
    )]
    #[diagnostic(code(ranklab_setup::gate::dependency_too_old))]
    DependencyTooOld {
        name: String,
        found: Version,
        required: Version,
    },
}

/// Check the host interpreter against the configured floor.
pub fn check_interpreter(dist: &DistConfig, interpreter: &InterpreterInfo) -> Result<(), GateError> {
    let (floor_major, floor_minor) = dist.interpreter_floor;
    let v = &interpreter.version;

    if (v.major, v.minor) < (floor_major, floor_minor) {
        return Err(GateError::EnvironmentTooOld {
            dist: dist.name.clone(),
            found: v.clone(),
            required: dist.interpreter_floor_display(),
            interpreter: interpreter.path.clone(),
        });
    }

    Ok(())
}

/// Check the probed numeric library against its constraint.
///
/// Returns the accepted version on success.
pub fn check_numeric(dist: &DistConfig, probed: &ProbedVersion) -> Result<Version, GateError> {
    let constraint = &dist.numeric;

    match probed {
        ProbedVersion::Absent => Err(GateError::MissingDependency {
            name: constraint.name.clone(),
            required: constraint.minimum.clone(),
        }),
        ProbedVersion::Present(found) if *found < constraint.minimum => {
            Err(GateError::DependencyTooOld {
                name: constraint.name.clone(),
                found: found.clone(),
                required: constraint.minimum.clone(),
            })
        }
        ProbedVersion::Present(found) => Ok(found.clone()),
    }
}

/// Run the full-build gates in order; the first failure aborts.
///
/// The numeric probe is passed as a closure so it provably never runs when
/// the interpreter gate already failed.
pub fn enforce<F>(
    dist: &DistConfig,
    interpreter: &InterpreterInfo,
    probe: F,
) -> Result<Version, GateError>
where
    F: FnOnce() -> ProbedVersion,
{
    check_interpreter(dist, interpreter)?;
    check_numeric(dist, &probe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn interpreter(major: u64, minor: u64) -> InterpreterInfo {
        InterpreterInfo {
            path: PathBuf::from("/usr/bin/python3"),
            version: Version::new(major, minor, 0),
        }
    }

    #[test]
    fn test_interpreter_at_floor_passes() {
        let dist = DistConfig::standard();
        assert!(check_interpreter(&dist, &interpreter(3, 6)).is_ok());
        assert!(check_interpreter(&dist, &interpreter(3, 11)).is_ok());
    }

    #[test]
    fn test_interpreter_below_floor_fails() {
        let dist = DistConfig::standard();
        let err = check_interpreter(&dist, &interpreter(3, 5)).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("3.6"));
        assert!(message.contains("3.5.0"));
        assert!(message.contains("/usr/bin/python3"));
    }

    #[test]
    fn test_numeric_absent_fails_with_minimum() {
        let dist = DistConfig::standard();
        let err = check_numeric(&dist, &ProbedVersion::Absent).unwrap_err();

        assert!(matches!(err, GateError::MissingDependency { .. }));
        assert!(err.to_string().contains("1.17.3"));
    }

    #[test]
    fn test_numeric_below_minimum_fails_with_both_values() {
        let dist = DistConfig::standard();
        let probed = ProbedVersion::Present(Version::new(1, 17, 2));
        let err = check_numeric(&dist, &probed).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("1.17.2"));
        assert!(message.contains("1.17.3"));
    }

    #[test]
    fn test_numeric_at_minimum_passes() {
        let dist = DistConfig::standard();
        let probed = ProbedVersion::Present(Version::new(1, 17, 3));
        assert_eq!(check_numeric(&dist, &probed).unwrap(), Version::new(1, 17, 3));

        let probed = ProbedVersion::Present(Version::new(1, 24, 0));
        assert!(check_numeric(&dist, &probed).is_ok());
    }

    #[test]
    fn test_probe_does_not_run_when_interpreter_gate_fails() {
        let dist = DistConfig::standard();
        let probed = Cell::new(false);

        let result = enforce(&dist, &interpreter(3, 5), || {
            probed.set(true);
            ProbedVersion::Absent
        });

        assert!(matches!(result, Err(GateError::EnvironmentTooOld { .. })));
        assert!(!probed.get(), "probe must not run after a floor failure");
    }

    #[test]
    fn test_enforce_passes_through_to_probe() {
        let dist = DistConfig::standard();
        let version = enforce(&dist, &interpreter(3, 8), || {
            ProbedVersion::Present(Version::new(1, 18, 0))
        })
        .unwrap();

        assert_eq!(version, Version::new(1, 18, 0));
    }
}
