//! `warren generate` - the full regeneration pass.

use std::path::Path;

use crate::cli::output;
use crate::core::project::Project;
use crate::error::Result;

pub fn run(dir: &Path) -> Result<()> {
    let project = Project::open(dir)?;
    let summary = project.generate()?;

    output::success("secrets generated");
    output::kv("services", summary.services);
    if summary.user_created {
        output::kv("user file", "created");
    } else if summary.user_synced {
        output::kv("user file", "updated");
    }
    output::kv("merged file", project.local_path().display());

    Ok(())
}
