//! User secrets file builder and structural sync.
//!
//! The user file is created once and then only ever reconciled additively:
//! sync adds missing keys and sections, strips deprecated properties, and
//! removes sections for deleted services, but never overwrites a value the
//! user has set.

use std::collections::btree_map::Entry;

use chrono::Utc;
use tracing::debug;

use crate::core::constants::{
    ALLOWED_ORIGINS, AUTH_SERVICE, AUTH_USER_SECRETS, USER_DEFAULT_SECRETS, USER_TTL_SECRETS,
};
use crate::core::model::{union_secret_names, Section, SecretsFile, ServiceSection};
use crate::core::project::{ProjectConfig, ServiceConfig, ServiceKind};
use crate::error::Result;

/// Build the user secrets file skeleton (first run only).
///
/// # Errors
///
/// Returns `ConfigError::MissingPort` if a frontend service needed for the
/// CORS origin list has no port.
pub fn build(config: &ProjectConfig) -> Result<SecretsFile> {
    let mut file = SecretsFile::new();
    file.set_metadata(
        "$comment",
        "User-configurable values: TTLs, domain, app URL, CORS origins.",
    );
    file.set_metadata(
        "$instructions",
        "Edit freely. Warren only adds missing keys and removes services deleted from warren.json.",
    );
    file.set_metadata("$generated", &Utc::now().to_rfc3339());

    for (key, value) in USER_DEFAULT_SECRETS {
        file.secrets.insert(key.to_string(), value.to_string());
    }

    let mut origins = Vec::new();
    for frontend in config.frontend_services() {
        origins.push(format!("http://localhost:{}", frontend.port()?));
    }
    if !origins.is_empty() {
        file.secrets
            .insert("KONG_CORS_ORIGINS".to_string(), origins.join(","));
    }

    for service in config.services.iter().filter(|s| !s.kind.is_worker()) {
        file.sections.insert(
            service.name.clone(),
            Section::Service(ServiceSection {
                secrets: Some(default_section_names(service, config)),
                vars: Default::default(),
            }),
        );
    }

    debug!(sections = file.sections.len(), "user file built");
    Ok(file)
}

/// Reconcile an existing user file against the current service list.
///
/// Adds absent TTL keys with their documented defaults, strips the
/// deprecated `ALLOWED_ORIGINS` property (traffic goes through the gateway
/// now), unions each configured service's `secrets` array with its current
/// defaults (existing entries first), creates sections for new services, and
/// removes sections for services no longer in the config.
///
/// Returns `None` when the result is identical to the input, so callers can
/// skip the write entirely.
pub fn sync_structure(existing: &SecretsFile, config: &ProjectConfig) -> Option<SecretsFile> {
    let mut result = existing.clone();

    for (key, default) in USER_TTL_SECRETS {
        result
            .secrets
            .entry(key.to_string())
            .or_insert_with(|| default.to_string());
    }

    for section in result.sections.values_mut() {
        if let Section::Service(service) = section {
            service.vars.remove(ALLOWED_ORIGINS);
        }
    }

    for service in config.services.iter().filter(|s| !s.kind.is_worker()) {
        let defaults = default_section_names(service, config);
        match result.sections.entry(service.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(Section::Service(ServiceSection {
                    secrets: Some(defaults),
                    vars: Default::default(),
                }));
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Section::Service(section) => {
                    let current = section.secrets.take().unwrap_or_default();
                    section.secrets = Some(union_secret_names(&current, &defaults));
                }
                // raw string/array sections are opaque; leave them alone
                Section::Opaque(_) => {}
            },
        }
    }

    let known: Vec<&str> = config.services.iter().map(|s| s.name.as_str()).collect();
    result
        .sections
        .retain(|name, _| known.contains(&name.as_str()));

    if result == *existing {
        debug!("user file already in sync");
        None
    } else {
        Some(result)
    }
}

/// The default secret-name array for a service's user section.
///
/// Backend secrets live in the framework file, so backend sections start
/// empty; frontends read the API through the gateway, and the auth service
/// owns the user-tunable token TTLs.
fn default_section_names(service: &ServiceConfig, config: &ProjectConfig) -> Vec<String> {
    let mut names = Vec::new();
    if service.kind.is_frontend() {
        names.push("API_URL".to_string());
        if service.kind == ServiceKind::Nextjs {
            names.push("JWT_ACCESS_TOKEN_TTL".to_string());
            names.push("JWT_REFRESH_TOKEN_TTL".to_string());
        }
    }
    if config.has_auth_template() && service.name == AUTH_SERVICE {
        for name in AUTH_USER_SECRETS {
            if !names.contains(&name.to_string()) {
                names.push(name.to_string());
            }
        }
    }
    names
}
