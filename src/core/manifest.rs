//! The per-service variable-name manifest.
//!
//! Deployment tooling consumes `service → [variable names]` to know which
//! variables a service's runtime environment must receive. Names come from
//! the framework and user sections; values are looked up elsewhere.

use std::collections::BTreeMap;

use crate::core::model::{union_secret_names, SecretsFile};
use crate::core::project::ProjectConfig;

/// Build the manifest for every configured service except workers.
///
/// The union is order-preserving with framework entries first. A service
/// absent from both files still gets an (empty) entry, and `DATABASE_URL` is
/// appended when the framework section carries one.
pub fn generate_secret_map(
    framework: &SecretsFile,
    user: &SecretsFile,
    config: &ProjectConfig,
) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();

    for service in config.services.iter().filter(|s| !s.kind.is_worker()) {
        let framework_names = framework
            .service(&service.name)
            .and_then(|s| s.secrets.clone())
            .unwrap_or_default();
        let user_names = user
            .service(&service.name)
            .and_then(|s| s.secrets.clone())
            .unwrap_or_default();

        let mut names = union_secret_names(&framework_names, &user_names);

        let has_database_url = framework
            .service(&service.name)
            .map(|s| s.vars.contains_key("DATABASE_URL"))
            .unwrap_or(false);
        if has_database_url && !names.contains(&"DATABASE_URL".to_string()) {
            names.push("DATABASE_URL".to_string());
        }

        map.insert(service.name.clone(), names);
    }

    map
}
