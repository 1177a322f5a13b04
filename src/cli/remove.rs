//! `warren remove` - delete a service's footprint from every secrets file.

use std::path::Path;

use crate::cli::output;
use crate::core::naming;
use crate::core::project::Project;
use crate::error::Result;

pub fn run(dir: &Path, service: &str) -> Result<()> {
    naming::validate_service_name(service)?;

    let project = Project::open(dir)?;
    if project.config().services.iter().any(|s| s.name == service) {
        output::warn(&format!(
            "'{}' is still listed in warren.json; it will be re-added on the next generate",
            service
        ));
    }

    let summary = project.remove_service(service)?;
    if summary.changed_files.is_empty() {
        output::success(&format!("no references to '{}' found", service));
    } else {
        output::success(&format!("removed '{}' references", service));
        for file in &summary.changed_files {
            output::item(file);
        }
    }

    Ok(())
}
