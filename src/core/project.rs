//! Project configuration and the orchestration entry point.
//!
//! `ProjectConfig` is the read-only service list consumed from `warren.json`;
//! [`Project`] is the primary interface tying the builders, merger, and
//! persistence together into the operations the CLI exposes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::constants::{AUTH_TEMPLATE, LOCAL_SECRETS_FILE, PROJECT_CONFIG_FILE};
use crate::core::{framework, manifest, merge, prune, store, user};
use crate::error::{ConfigError, Result};

/// How a service participates in the secret surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Backend service (NestJS).
    Nestjs,
    /// Server-rendered frontend; needs gateway access at render time.
    Nextjs,
    /// Browser-only frontend; receives no server secrets.
    Spa,
    /// Background worker sharing its base service's secrets.
    Worker,
}

impl ServiceKind {
    /// Frontend services never receive API keys or machine credentials.
    pub fn is_frontend(&self) -> bool {
        matches!(self, ServiceKind::Nextjs | ServiceKind::Spa)
    }

    /// Workers contribute no section of their own.
    pub fn is_worker(&self) -> bool {
        matches!(self, ServiceKind::Worker)
    }

    /// Backend = neither frontend nor worker.
    pub fn is_backend(&self) -> bool {
        !self.is_frontend() && !self.is_worker()
    }
}

/// One service entry in `warren.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default)]
    pub has_database: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_service: Option<String>,
}

impl ServiceConfig {
    /// The service's port, required for every non-worker service.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingPort` when absent.
    pub fn port(&self) -> Result<u16> {
        self.port.ok_or_else(|| {
            ConfigError::MissingPort {
                service: self.name.clone(),
            }
            .into()
        })
    }
}

/// The project's service list and enabled templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl ProjectConfig {
    /// Whether an auth-capable template is enabled for the project.
    pub fn has_auth_template(&self) -> bool {
        self.templates.iter().any(|t| t == AUTH_TEMPLATE)
    }

    /// Services that own machine credentials (non-frontend, non-worker).
    pub fn backend_services(&self) -> impl Iterator<Item = &ServiceConfig> {
        self.services.iter().filter(|s| s.kind.is_backend())
    }

    /// Frontend services (`nextjs` and `spa`).
    pub fn frontend_services(&self) -> impl Iterator<Item = &ServiceConfig> {
        self.services.iter().filter(|s| s.kind.is_frontend())
    }

    /// Load the project config from `warren.json` in `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist, or
    /// `ConfigError::Parse` if it is malformed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PROJECT_CONFIG_FILE);
        debug!(path = %path.display(), "loading project config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(services = config.services.len(), "project config loaded");
        Ok(config)
    }
}

/// Outcome of a full `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Number of services with a section in the merged file.
    pub services: usize,
    /// The user file did not exist and was created.
    pub user_created: bool,
    /// An existing user file was structurally updated.
    pub user_synced: bool,
}

/// Outcome of a standalone user-file sync.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub created: bool,
    pub changed: bool,
}

/// Outcome of removing a service's footprint.
#[derive(Debug, Clone, Default)]
pub struct RemoveSummary {
    /// File names that were rewritten.
    pub changed_files: Vec<String>,
}

/// The primary interface for warren operations.
///
/// Owns the project root and config; every operation is a single synchronous
/// pass that computes its outputs fully in memory before writing anything.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Open the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if `warren.json` is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = ProjectConfig::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regenerate the framework file, reconcile the user file, and write the
    /// merged local file.
    ///
    /// All three files are computed before the first write so a failure never
    /// leaves a half-written framework file (which would silently drop
    /// preserved secrets on the next run).
    ///
    /// # Errors
    ///
    /// Returns configuration errors (missing port, invalid name) and
    /// referential-integrity errors from the merge.
    pub fn generate(&self) -> Result<GenerateSummary> {
        let existing_framework = store::load_framework(&self.root);
        let framework_file = framework::build(&self.config, existing_framework.as_ref())?;

        let existing_user = store::load_user(&self.root);
        let (user_file, user_created, user_synced) = match existing_user {
            None => (user::build(&self.config)?, true, false),
            Some(current) => match user::sync_structure(&current, &self.config) {
                Some(updated) => (updated, false, true),
                None => (current, false, false),
            },
        };

        let local_file = merge::merge_secrets(&framework_file, &user_file)?;

        store::write_framework(&self.root, &framework_file)?;
        if user_created || user_synced {
            store::write_user(&self.root, &user_file)?;
        }
        store::write_local(&self.root, &local_file)?;

        info!(
            services = local_file.sections.len(),
            user_created, user_synced, "secrets generated"
        );

        Ok(GenerateSummary {
            services: local_file.sections.len(),
            user_created,
            user_synced,
        })
    }

    /// Reconcile the user file against the current service list without
    /// touching the framework or local files.
    ///
    /// Creates the user file if it doesn't exist yet; otherwise applies the
    /// additive structural sync and only writes when something changed.
    pub fn sync_user(&self) -> Result<SyncSummary> {
        match store::load_user(&self.root) {
            None => {
                let file = user::build(&self.config)?;
                store::write_user(&self.root, &file)?;
                Ok(SyncSummary {
                    created: true,
                    changed: true,
                })
            }
            Some(current) => match user::sync_structure(&current, &self.config) {
                Some(updated) => {
                    store::write_user(&self.root, &updated)?;
                    Ok(SyncSummary {
                        created: false,
                        changed: true,
                    })
                }
                None => Ok(SyncSummary {
                    created: false,
                    changed: false,
                }),
            },
        }
    }

    /// Remove every reference to `service` from all three secrets files.
    ///
    /// Files that don't exist or already carry no reference are left alone.
    pub fn remove_service(&self, service: &str) -> Result<RemoveSummary> {
        let mut summary = RemoveSummary::default();
        for file_name in store::SECRETS_FILES {
            let path = self.root.join(file_name);
            let Some(tree) = store::load_raw(&path) else {
                continue;
            };
            let outcome = prune::delete_service_references(&tree, service);
            if outcome.modified {
                store::write_raw(&path, &outcome.result)?;
                summary.changed_files.push(file_name.to_string());
            }
        }

        info!(service, files = summary.changed_files.len(), "service references removed");
        Ok(summary)
    }

    /// The `service → [variable names]` manifest for deployment tooling.
    ///
    /// Sources the framework and user files when present; a service absent
    /// from both still maps to an empty list.
    pub fn secret_map(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let framework_file = store::load_framework(&self.root).unwrap_or_default();
        let user_file = store::load_user(&self.root).unwrap_or_default();
        Ok(manifest::generate_secret_map(
            &framework_file,
            &user_file,
            &self.config,
        ))
    }

    /// Load the merged local file, failing if generation has not run yet.
    pub fn local_secrets(&self) -> Result<crate::core::model::SecretsFile> {
        store::load_local(&self.root)
    }

    /// Path of the derived local file (for display).
    pub fn local_path(&self) -> PathBuf {
        self.root.join(LOCAL_SECRETS_FILE)
    }
}
