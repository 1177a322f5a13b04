//! `warren map` - print the per-service variable manifest.

use std::path::Path;

use crate::cli::output;
use crate::core::project::Project;
use crate::error::Result;

pub fn run(dir: &Path, json: bool) -> Result<()> {
    let project = Project::open(dir)?;
    let map = project.secret_map()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map).unwrap_or_default());
        return Ok(());
    }

    for (service, names) in &map {
        output::kv(service, names.len());
        for name in names {
            output::item(name);
        }
    }

    Ok(())
}
