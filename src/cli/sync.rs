//! `warren sync` - reconcile the user file with the service list.

use std::path::Path;

use crate::cli::output;
use crate::core::project::Project;
use crate::error::Result;

pub fn run(dir: &Path) -> Result<()> {
    let project = Project::open(dir)?;
    let summary = project.sync_user()?;

    if summary.created {
        output::success("user secrets file created");
    } else if summary.changed {
        output::success("user secrets file updated");
        output::hint("run warren generate to refresh the merged file");
    } else {
        output::success("user secrets file already in sync");
    }

    Ok(())
}
