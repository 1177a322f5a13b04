//! The on-disk secrets file model.
//!
//! All three files (framework, user, merged/local) share one flat JSON shape:
//! `$`-prefixed top-level keys are metadata, `secrets` is a flat map of
//! variable name to string value, and every other top-level key is a service
//! section. Sections carry a `secrets` array of variable *names* before
//! resolution and direct string properties after.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::core::constants::SECRETS_KEY;

/// A parsed secrets file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecretsFile {
    /// `$`-prefixed top-level entries (comment, warning, generation stamp).
    /// Passed through untouched by all merging logic.
    pub metadata: BTreeMap<String, Value>,
    /// Flat variable name → string value map.
    pub secrets: BTreeMap<String, String>,
    /// Service sections keyed by service name.
    pub sections: BTreeMap<String, Section>,
}

/// A top-level service entry.
///
/// Usually a [`ServiceSection`]; raw strings and arrays are tolerated and
/// carried through opaquely.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Service(ServiceSection),
    Opaque(Value),
}

/// A service's sub-object in a secrets file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceSection {
    /// Names of top-level secrets this service is entitled to.
    /// `None` once resolution has replaced the array with direct properties.
    pub secrets: Option<Vec<String>>,
    /// Direct string properties (`PORT`, `API_KEY`, `DATABASE_URL`, and
    /// resolved variables).
    pub vars: BTreeMap<String, String>,
}

impl SecretsFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a secrets file from its JSON value.
    ///
    /// Returns `None` if the value is not an object. Anything else is
    /// tolerated: legacy nested objects under `secrets` are flattened with
    /// `_`-joined path segments, scalar values are stringified, and
    /// non-object sections are kept opaque.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let mut file = Self::new();
        for (key, entry) in map {
            if key.starts_with('$') {
                file.metadata.insert(key.clone(), entry.clone());
            } else if key == SECRETS_KEY {
                if let Value::Object(secrets) = entry {
                    flatten_secrets(secrets, None, &mut file.secrets);
                }
            } else {
                file.sections.insert(key.clone(), Section::from_value(entry));
            }
        }

        Some(file)
    }

    /// Serialize back to the flat JSON object shape.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (key, entry) in &self.metadata {
            map.insert(key.clone(), entry.clone());
        }
        map.insert(
            SECRETS_KEY.to_string(),
            Value::Object(
                self.secrets
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );
        for (name, section) in &self.sections {
            map.insert(name.clone(), section.to_value());
        }
        Value::Object(map)
    }

    /// Look up a service section, ignoring opaque entries.
    pub fn service(&self, name: &str) -> Option<&ServiceSection> {
        match self.sections.get(name) {
            Some(Section::Service(section)) => Some(section),
            _ => None,
        }
    }

    /// Mutable variant of [`SecretsFile::service`].
    pub fn service_mut(&mut self, name: &str) -> Option<&mut ServiceSection> {
        match self.sections.get_mut(name) {
            Some(Section::Service(section)) => Some(section),
            _ => None,
        }
    }

    /// Set a string metadata entry. The key must carry its `$` prefix.
    pub fn set_metadata(&mut self, key: &str, value: &str) {
        self.metadata
            .insert(key.to_string(), Value::String(value.to_string()));
    }
}

impl Section {
    fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Section::Opaque(value.clone());
        };

        let mut section = ServiceSection::default();
        for (key, entry) in map {
            if key == SECRETS_KEY {
                if let Value::Array(items) = entry {
                    section.secrets = Some(
                        items
                            .iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect(),
                    );
                    continue;
                }
            }
            match entry {
                Value::String(s) => {
                    section.vars.insert(key.clone(), s.clone());
                }
                Value::Number(n) => {
                    section.vars.insert(key.clone(), n.to_string());
                }
                Value::Bool(b) => {
                    section.vars.insert(key.clone(), b.to_string());
                }
                _ => {
                    warn!(key = %key, "ignoring non-scalar section property");
                }
            }
        }

        Section::Service(section)
    }

    fn to_value(&self) -> Value {
        match self {
            Section::Opaque(value) => value.clone(),
            Section::Service(section) => {
                let mut map = Map::new();
                if let Some(secrets) = &section.secrets {
                    map.insert(
                        SECRETS_KEY.to_string(),
                        Value::Array(
                            secrets.iter().map(|s| Value::String(s.clone())).collect(),
                        ),
                    );
                }
                for (key, value) in &section.vars {
                    map.insert(key.clone(), Value::String(value.clone()));
                }
                Value::Object(map)
            }
        }
    }
}

/// Union two secret-name lists, first list's order winning, no duplicates.
pub fn union_secret_names(first: &[String], second: &[String]) -> Vec<String> {
    let mut names = first.to_vec();
    for name in second {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// Flatten a (possibly legacy-nested) secrets object into flat string pairs.
///
/// A nested object like `"REDIS": {"HOST": "localhost"}` becomes
/// `REDIS_HOST=localhost`. Numbers and booleans are stringified; arrays and
/// nulls have no flat representation and are dropped with a warning.
fn flatten_secrets(map: &Map<String, Value>, prefix: Option<&str>, out: &mut BTreeMap<String, String>) {
    for (key, value) in map {
        let name = match prefix {
            Some(p) => format!("{}_{}", p, key),
            None => key.clone(),
        };
        match value {
            Value::String(s) => {
                out.insert(name, s.clone());
            }
            Value::Number(n) => {
                out.insert(name, n.to_string());
            }
            Value::Bool(b) => {
                out.insert(name, b.to_string());
            }
            Value::Object(nested) => flatten_secrets(nested, Some(&name), out),
            Value::Array(_) | Value::Null => {
                warn!(key = %name, "dropping secret without a flat string form");
            }
        }
    }
}
