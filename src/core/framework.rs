//! Framework secrets file builder.
//!
//! Regenerates the framework-owned file on every run while reproducing
//! preserve-marked values (JWT material, trust token, API keys, database
//! credentials) byte-for-byte from the prior file. Everything else is
//! recomputed from the current service list.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use crate::core::constants::{
    AUTH_FRAMEWORK_SECRETS, AUTH_SERVICE, BACKEND_DEFAULT_SECRETS, BASE_SECRETS, BCRYPT_ROUNDS,
    BCRYPT_ROUNDS_DEFAULT, DATABASE_PORT_BASE, GATEWAY_TRUST_TOKEN, JWT_KEY_ID, JWT_PRIVATE_KEY,
    JWT_PUBLIC_KEY, JWT_REFRESH_TOKEN_SECRET, KONG_SECRETS, NEXTJS_FRAMEWORK_SECRETS,
    REDIS_SECRETS,
};
use crate::core::generate::{self, UrlEnvironment};
use crate::core::model::{Section, SecretsFile, ServiceSection};
use crate::core::naming;
use crate::core::project::{ProjectConfig, ServiceKind};
use crate::error::Result;

/// Build the framework secrets file.
///
/// `existing` is the previously-generated file, if any; preserve-marked
/// values found there are carried over unchanged.
///
/// # Errors
///
/// Returns `ConfigError::MissingPort` for any non-worker service without a
/// port, and `ConfigError::InvalidServiceName` from database credential
/// generation. Nothing is written on failure.
pub fn build(config: &ProjectConfig, existing: Option<&SecretsFile>) -> Result<SecretsFile> {
    let empty = BTreeMap::new();
    let prior = existing.map(|f| &f.secrets).unwrap_or(&empty);

    let mut file = SecretsFile::new();
    file.set_metadata(
        "$comment",
        "Machine-to-machine credentials for every service in this project.",
    );
    file.set_metadata(
        "$warning",
        "Generated by warren. Do not edit; changes will be overwritten on the next run.",
    );
    file.set_metadata("$generated", &Utc::now().to_rfc3339());

    for (key, value) in BASE_SECRETS {
        file.secrets.insert(key.to_string(), value.to_string());
    }

    if config.has_auth_template() {
        build_auth_material(&mut file, prior)?;
    }

    let trust_token = prior
        .get(GATEWAY_TRUST_TOKEN)
        .cloned()
        .unwrap_or_else(|| generate::hex_secret(32));
    file.secrets.insert(GATEWAY_TRUST_TOKEN.to_string(), trust_token);

    file.secrets.extend(generate::service_api_keys(config, prior));
    file.secrets
        .extend(generate::service_urls(config, prior, UrlEnvironment::Local)?);

    for (key, value) in REDIS_SECRETS.iter().chain(KONG_SECRETS) {
        file.secrets.insert(key.to_string(), value.to_string());
    }

    let database_urls = build_database_credentials(&mut file, config, prior)?;
    build_sections(&mut file, config, &database_urls)?;

    debug!(
        secrets = file.secrets.len(),
        sections = file.sections.len(),
        "framework file built"
    );
    Ok(file)
}

/// Preserve or generate the RSA triple, refresh-token secret, and bcrypt
/// rounds. The triple is regenerated as a unit: a file carrying only part of
/// it is treated as not carrying it at all.
fn build_auth_material(file: &mut SecretsFile, prior: &BTreeMap<String, String>) -> Result<()> {
    match (
        prior.get(JWT_PRIVATE_KEY),
        prior.get(JWT_PUBLIC_KEY),
        prior.get(JWT_KEY_ID),
    ) {
        (Some(private_key), Some(public_key), Some(key_id)) => {
            file.secrets.insert(JWT_PRIVATE_KEY.to_string(), private_key.clone());
            file.secrets.insert(JWT_PUBLIC_KEY.to_string(), public_key.clone());
            file.secrets.insert(JWT_KEY_ID.to_string(), key_id.clone());
        }
        _ => {
            let pair = generate::rsa_key_pair()?;
            file.secrets.insert(JWT_PRIVATE_KEY.to_string(), pair.private_key_pem);
            file.secrets.insert(JWT_PUBLIC_KEY.to_string(), pair.public_key_pem);
            file.secrets.insert(JWT_KEY_ID.to_string(), pair.key_id);
        }
    }

    let refresh = prior
        .get(JWT_REFRESH_TOKEN_SECRET)
        .cloned()
        .unwrap_or_else(|| generate::base64_secret(32));
    file.secrets.insert(JWT_REFRESH_TOKEN_SECRET.to_string(), refresh);

    let rounds = prior
        .get(BCRYPT_ROUNDS)
        .cloned()
        .unwrap_or_else(|| BCRYPT_ROUNDS_DEFAULT.to_string());
    file.secrets.insert(BCRYPT_ROUNDS.to_string(), rounds);

    Ok(())
}

/// Generate or preserve username/password pairs for database-backed services
/// and return each service's connection URL.
///
/// Ports auto-increment from 5432 for services without an explicit
/// `databasePort`; explicit ports do not advance the counter.
fn build_database_credentials(
    file: &mut SecretsFile,
    config: &ProjectConfig,
    prior: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let mut urls = BTreeMap::new();
    let mut next_port = DATABASE_PORT_BASE;

    for service in config
        .services
        .iter()
        .filter(|s| s.has_database && !s.kind.is_worker())
    {
        let port = match service.database_port {
            Some(port) => port,
            None => {
                let port = next_port;
                next_port += 1;
                port
            }
        };

        let prefix = naming::env_prefix(&service.name);
        let username_key = format!("{}DB_USERNAME", prefix);
        let password_key = format!("{}DB_PASSWORD", prefix);

        let credentials = generate::database_secrets(
            &service.name,
            port,
            prior.get(&username_key).map(String::as_str),
            prior.get(&password_key).map(String::as_str),
        )?;

        file.secrets.insert(username_key, credentials.username);
        file.secrets.insert(password_key, credentials.password);
        urls.insert(service.name.clone(), credentials.url);
    }

    Ok(urls)
}

/// Build one section per non-worker service.
///
/// Backend sections get the full mesh: every backend's API key and URL name,
/// on top of the default set and the gateway trust token.
fn build_sections(
    file: &mut SecretsFile,
    config: &ProjectConfig,
    database_urls: &BTreeMap<String, String>,
) -> Result<()> {
    let api_key_names: Vec<String> = config
        .backend_services()
        .map(|s| format!("{}API_KEY", naming::env_prefix(&s.name)))
        .collect();
    let url_names: Vec<String> = config
        .backend_services()
        .map(|s| format!("{}URL", naming::env_prefix(&s.name)))
        .collect();

    for service in &config.services {
        if service.kind.is_worker() {
            continue;
        }
        let port = service.port()?;

        let mut section = ServiceSection {
            secrets: Some(Vec::new()),
            vars: BTreeMap::from([("PORT".to_string(), port.to_string())]),
        };

        if service.kind.is_frontend() {
            if service.kind == ServiceKind::Nextjs {
                section.secrets = Some(
                    NEXTJS_FRAMEWORK_SECRETS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                );
            }
        } else {
            let mut names: Vec<String> = BACKEND_DEFAULT_SECRETS
                .iter()
                .map(|s| s.to_string())
                .collect();
            names.push(GATEWAY_TRUST_TOKEN.to_string());
            names.extend(api_key_names.iter().cloned());
            names.extend(url_names.iter().cloned());
            if config.has_auth_template() && service.name == AUTH_SERVICE {
                names.extend(AUTH_FRAMEWORK_SECRETS.iter().map(|s| s.to_string()));
            }
            if service.has_database {
                let prefix = naming::env_prefix(&service.name);
                names.push(format!("{}DB_USERNAME", prefix));
                names.push(format!("{}DB_PASSWORD", prefix));
            }
            section.secrets = Some(names);
            section.vars.insert(
                "API_KEY".to_string(),
                format!("{}API_KEY", naming::env_prefix(&service.name)),
            );
        }

        if let Some(url) = database_urls.get(&service.name) {
            section.vars.insert("DATABASE_URL".to_string(), url.clone());
        }

        file.sections
            .insert(service.name.clone(), Section::Service(section));
    }

    Ok(())
}
