//! `ranklab-setup clean` command

use std::path::Path;

use anyhow::Result;

use ranklab_setup::dist::DistConfig;
use ranklab_setup::intent::InvocationIntent;
use ranklab_setup::SetupOrchestrator;

pub fn execute(dist_root: &Path) -> Result<()> {
    let orchestrator = SetupOrchestrator::new(DistConfig::standard(), dist_root.to_path_buf());
    let intent = InvocationIntent::new(vec!["clean".to_string()]);

    orchestrator.dispatch(&intent)?;
    Ok(())
}
