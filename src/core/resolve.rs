//! Reference resolution over a merged secrets file.
//!
//! Service sections reference top-level secrets by name: an `API_KEY`
//! placeholder and the `secrets` array of variable names. Resolution is an
//! explicit pass after merging, so a dangling reference fails at generation
//! time instead of at service startup.

use tracing::debug;

use crate::core::model::{Section, SecretsFile};
use crate::error::{ResolveError, Result};

/// Replace each section's `API_KEY` placeholder with the referenced value.
///
/// An `API_KEY` whose value is a key in the top-level `secrets` map is
/// replaced with that secret's value; anything else is left untouched and
/// treated as an already-resolved literal.
pub fn resolve_api_key_references(file: &mut SecretsFile) {
    for section in file.sections.values_mut() {
        let Section::Service(service) = section else {
            continue;
        };
        let resolved = service
            .vars
            .get("API_KEY")
            .and_then(|reference| file.secrets.get(reference))
            .cloned();
        if let Some(value) = resolved {
            service.vars.insert("API_KEY".to_string(), value);
        }
    }
}

/// Resolve each section's `secrets` array into direct properties.
///
/// Every named reference must exist in the top-level `secrets` map. On
/// success the array is deleted: it is an authoring convenience, and
/// consumers read the direct properties.
///
/// # Errors
///
/// Returns `ResolveError::MissingReference` naming the offending service and
/// the missing reference. The file is partially mutated on error and must be
/// discarded by the caller.
pub fn resolve_secret_arrays(file: &mut SecretsFile) -> Result<()> {
    for (name, section) in file.sections.iter_mut() {
        let Section::Service(service) = section else {
            continue;
        };
        let Some(references) = service.secrets.take() else {
            continue;
        };
        for reference in &references {
            let Some(value) = file.secrets.get(reference) else {
                return Err(ResolveError::MissingReference {
                    service: name.clone(),
                    reference: reference.clone(),
                }
                .into());
            };
            service.vars.insert(reference.clone(), value.clone());
        }
        debug!(service = %name, resolved = references.len(), "secrets array resolved");
    }
    Ok(())
}
