//! Merging the framework and user files into the effective local file.
//!
//! User values win on collision, except the per-section `secrets` array,
//! which is unioned so framework-granted access survives a partial user
//! array. Metadata is taken from the framework file only: the merged file's
//! provenance comment always describes generation, never user authorship.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::model::{union_secret_names, Section, SecretsFile, ServiceSection};
use crate::core::resolve;
use crate::error::Result;

/// Merge the framework and user files and resolve all references.
///
/// The returned file contains fully-resolved literal values: every
/// `API_KEY` placeholder and every `secrets` array entry has been replaced
/// by a direct property.
///
/// # Errors
///
/// Returns `ResolveError::MissingReference` when a section names a secret
/// absent from the merged top-level map.
pub fn merge_secrets(framework: &SecretsFile, user: &SecretsFile) -> Result<SecretsFile> {
    let mut merged = SecretsFile::new();

    merged.metadata = framework.metadata.clone();

    merged.secrets = framework.secrets.clone();
    for (key, value) in &user.secrets {
        merged.secrets.insert(key.clone(), value.clone());
    }

    let names: BTreeSet<&String> = framework
        .sections
        .keys()
        .chain(user.sections.keys())
        .collect();
    for name in names {
        let section = match (framework.sections.get(name), user.sections.get(name)) {
            (Some(Section::Service(fw)), Some(Section::Service(us))) => {
                Section::Service(merge_sections(fw, us))
            }
            // user wins when the shapes disagree
            (Some(_), Some(us)) => us.clone(),
            (Some(fw), None) => fw.clone(),
            (None, Some(us)) => us.clone(),
            (None, None) => unreachable!("name came from one of the two maps"),
        };
        merged.sections.insert(name.clone(), section);
    }

    resolve::resolve_api_key_references(&mut merged);
    resolve::resolve_secret_arrays(&mut merged)?;

    debug!(
        secrets = merged.secrets.len(),
        sections = merged.sections.len(),
        "files merged"
    );
    Ok(merged)
}

/// Shallow-merge one section: user vars win, `secrets` arrays are unioned
/// with framework entries first.
fn merge_sections(framework: &ServiceSection, user: &ServiceSection) -> ServiceSection {
    let mut vars = framework.vars.clone();
    for (key, value) in &user.vars {
        vars.insert(key.clone(), value.clone());
    }

    let secrets = match (&framework.secrets, &user.secrets) {
        (Some(fw), Some(us)) => Some(union_secret_names(fw, us)),
        (Some(fw), None) => Some(fw.clone()),
        (None, Some(us)) => Some(us.clone()),
        (None, None) => None,
    };

    ServiceSection { secrets, vars }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SecretsFile {
        SecretsFile::from_value(&value).unwrap()
    }

    #[test]
    fn test_user_wins_on_secret_collision() {
        let framework = parse(json!({"secrets": {"KEY": "fw"}}));
        let user = parse(json!({"secrets": {"KEY": "user"}}));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(merged.secrets.get("KEY").unwrap(), "user");
    }

    #[test]
    fn test_metadata_comes_from_framework_only() {
        let framework = parse(json!({"$comment": "generated", "secrets": {}}));
        let user = parse(json!({"$comment": "hand-edited", "$extra": "x", "secrets": {}}));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(merged.metadata.get("$comment").unwrap(), "generated");
        assert!(!merged.metadata.contains_key("$extra"));
    }

    #[test]
    fn test_section_arrays_are_unioned_framework_first() {
        let framework = parse(json!({
            "secrets": {"A": "1", "B": "2", "C": "3"},
            "svc": {"secrets": ["A", "B"]}
        }));
        let user = parse(json!({
            "secrets": {},
            "svc": {"secrets": ["C", "A"]}
        }));

        let merged = merge_secrets(&framework, &user).unwrap();
        let section = merged.service("svc").unwrap();
        // array deleted, resolved to direct properties
        assert!(section.secrets.is_none());
        assert_eq!(section.vars.get("A").unwrap(), "1");
        assert_eq!(section.vars.get("B").unwrap(), "2");
        assert_eq!(section.vars.get("C").unwrap(), "3");
    }

    #[test]
    fn test_empty_user_array_keeps_framework_grants() {
        let framework = parse(json!({
            "secrets": {"A": "1"},
            "svc": {"secrets": ["A"]}
        }));
        let user = parse(json!({
            "secrets": {},
            "svc": {"secrets": []}
        }));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(merged.service("svc").unwrap().vars.get("A").unwrap(), "1");
    }

    #[test]
    fn test_api_key_placeholder_resolves_through_merge() {
        let framework = parse(json!({
            "secrets": {"SVC_API_KEY": "hex-material"},
            "svc": {"secrets": [], "API_KEY": "SVC_API_KEY"}
        }));
        let user = parse(json!({"secrets": {}}));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(merged.service("svc").unwrap().vars.get("API_KEY").unwrap(), "hex-material");
    }

    #[test]
    fn test_user_section_vars_win() {
        let framework = parse(json!({
            "secrets": {},
            "svc": {"secrets": [], "PORT": "3001"}
        }));
        let user = parse(json!({
            "secrets": {},
            "svc": {"secrets": [], "PORT": "4001"}
        }));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(merged.service("svc").unwrap().vars.get("PORT").unwrap(), "4001");
    }

    #[test]
    fn test_user_reference_can_satisfy_framework_array() {
        let framework = parse(json!({
            "secrets": {},
            "svc": {"secrets": ["USER_SUPPLIED"]}
        }));
        let user = parse(json!({"secrets": {"USER_SUPPLIED": "value"}}));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert_eq!(
            merged.service("svc").unwrap().vars.get("USER_SUPPLIED").unwrap(),
            "value"
        );
    }

    #[test]
    fn test_unresolved_reference_fails_merge() {
        let framework = parse(json!({
            "secrets": {},
            "svc": {"secrets": ["MISSING"]}
        }));
        let user = parse(json!({"secrets": {}}));

        assert!(merge_secrets(&framework, &user).is_err());
    }

    #[test]
    fn test_sections_from_either_side_survive() {
        let framework = parse(json!({
            "secrets": {"A": "1"},
            "fw-only": {"secrets": ["A"]}
        }));
        let user = parse(json!({
            "secrets": {},
            "user-only": {"secrets": []}
        }));

        let merged = merge_secrets(&framework, &user).unwrap();
        assert!(merged.service("fw-only").is_some());
        assert!(merged.service("user-only").is_some());
    }
}
