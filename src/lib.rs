//! ranklab-setup - build and installation orchestrator for the ranklab
//! scientific distribution.
//!
//! This crate provides the core library functionality for ranklab-setup,
//! including invocation classification, environment gating, build
//! configuration, packaging dispatch and artifact cleanup.

pub mod backend;
pub mod clean;
pub mod configure;
pub mod descriptor;
pub mod dist;
pub mod gate;
pub mod intent;
pub mod orchestrate;
pub mod probe;
pub mod util;

pub use clean::{ArtifactCleaner, CleanupTarget};
pub use configure::ExtensionConfig;
pub use descriptor::PackageDescriptor;
pub use dist::{DistConfig, VersionConstraint};
pub use gate::GateError;
pub use intent::{IntentClass, InvocationIntent};
pub use orchestrate::SetupOrchestrator;
pub use probe::{InterpreterInfo, ProbedVersion};
