//! Changed-attribute extraction for audit entries.
//!
//! Records are compared as serialized JSON objects. Only keys whose values
//! differ are kept, minus the ignored keys.

use serde::Serialize;
use serde_json::{Map, Value};

/// Attributes never written to the audit log.
pub const IGNORED_ATTRIBUTES: &[&str] = &["updated_at"];

/// Build audit properties from the record before and after a change.
///
/// `before` is `None` on create and `after` is `None` on delete. Returns
/// `None` when nothing worth logging changed.
pub fn changed_attributes<T: Serialize>(
    before: Option<&T>,
    after: Option<&T>,
    ignore: &[&str],
) -> Option<Value> {
    let before = before.map(to_object);
    let after = after.map(to_object);

    let mut attributes = Map::new();
    let mut old = Map::new();

    match (&before, &after) {
        (None, Some(after)) => {
            for (key, value) in after {
                if !ignore.contains(&key.as_str()) {
                    attributes.insert(key.clone(), value.clone());
                }
            }
        }
        (Some(before), None) => {
            for (key, value) in before {
                if !ignore.contains(&key.as_str()) {
                    old.insert(key.clone(), value.clone());
                }
            }
        }
        (Some(before), Some(after)) => {
            for (key, value) in after {
                if ignore.contains(&key.as_str()) {
                    continue;
                }
                let previous = before.get(key).unwrap_or(&Value::Null);
                if previous != value {
                    attributes.insert(key.clone(), value.clone());
                    old.insert(key.clone(), previous.clone());
                }
            }
        }
        (None, None) => {}
    }

    if attributes.is_empty() && old.is_empty() {
        return None;
    }

    let mut properties = Map::new();
    if !attributes.is_empty() {
        properties.insert("attributes".to_string(), Value::Object(attributes));
    }
    if !old.is_empty() {
        properties.insert("old".to_string(), Value::Object(old));
    }
    Some(Value::Object(properties))
}

fn to_object<T: Serialize>(record: &T) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
