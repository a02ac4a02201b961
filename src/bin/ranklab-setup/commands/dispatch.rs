//! Forwarding to the packaging backend.
//!
//! Everything that is not a tool-level command ends up here: the argument
//! list is classified once and the orchestrator routes it to the
//! metadata-only or full-build path.

use std::path::Path;

use anyhow::Result;

use ranklab_setup::dist::DistConfig;
use ranklab_setup::intent::InvocationIntent;
use ranklab_setup::SetupOrchestrator;

pub fn execute(dist_root: &Path, args: Vec<String>) -> Result<i32> {
    let orchestrator = SetupOrchestrator::new(DistConfig::standard(), dist_root.to_path_buf());
    let intent = InvocationIntent::new(args);

    orchestrator.dispatch(&intent)
}
