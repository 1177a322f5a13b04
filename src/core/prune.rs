//! Deep deletion of a service's footprint from an arbitrary JSON tree.
//!
//! Used by "remove service" workflows against any file that may reference a
//! removed service, not just well-formed secrets files. The transform is
//! pure: it returns a new tree plus a `modified` flag and never mutates the
//! input, so the same sub-object appearing in multiple branches cannot
//! alias.

use serde_json::{Map, Value};

use crate::core::naming;

/// Result of a deep-delete pass.
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    /// Whether anything was removed. `false` means `result` equals the input
    /// and callers can skip the write.
    pub modified: bool,
    /// The pruned tree.
    pub result: Value,
}

/// Remove every key, section, and string value belonging to `service`.
///
/// Deletion rules, applied depth-first:
/// - an object key exactly equal to the service name is dropped;
/// - an object key starting with `{SCREAMING_SNAKE}_` is dropped. This is a
///   pure prefix match, so removing `demo-service` also drops
///   `DEMO_SERVICE_DEMO_KEY` but never `DEMOX_SERVICE_KEY`;
/// - a string value containing the uppercase service name is dropped;
/// - arrays are filtered; objects left empty stay as empty objects.
pub fn delete_service_references(tree: &Value, service: &str) -> PruneOutcome {
    let upper = naming::to_screaming_snake(service);
    let prefix = naming::env_prefix(service);

    let mut modified = false;
    let result = prune(tree, service, &upper, &prefix, &mut modified).unwrap_or(Value::Null);
    PruneOutcome { modified, result }
}

/// Recursive transform; `None` means the value itself was dropped.
fn prune(
    value: &Value,
    service: &str,
    upper: &str,
    prefix: &str,
    modified: &mut bool,
) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                if key == service || key.starts_with(prefix) {
                    *modified = true;
                    continue;
                }
                match prune(entry, service, upper, prefix, modified) {
                    Some(kept) => {
                        out.insert(key.clone(), kept);
                    }
                    None => *modified = true,
                }
            }
            Some(Value::Object(out))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match prune(item, service, upper, prefix, modified) {
                    Some(kept) => out.push(kept),
                    None => *modified = true,
                }
            }
            Some(Value::Array(out))
        }
        Value::String(s) if s.contains(upper) => None,
        other => Some(other.clone()),
    }
}
