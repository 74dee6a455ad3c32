//! Tag-preserving YAML loader

use crate::errors::{EwtError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parse ESPHome YAML text into a top-level mapping
pub fn load_config_str(content: &str) -> Result<Mapping> {
    let raw: Value = serde_yaml::from_str(content)?;
    let mut value = strip_tags(raw);
    // `<<: !include base.yaml` leaves a scalar where a mapping is expected
    drop_unmergeable(&mut value);
    if let Err(e) = value.apply_merge() {
        log::debug!("Skipping YAML merge keys: {}", e);
    }

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(EwtError::Yaml(format!(
            "expected a mapping at the document root, found {}",
            kind_of(&other)
        ))),
    }
}

/// Read and parse an ESPHome YAML file
pub fn load_config_file(path: &Path) -> Result<Mapping> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| EwtError::Source(format!("Failed to read {}: {}", path.display(), e)))?;

    load_config_str(&content).map_err(|e| match e {
        EwtError::Yaml(msg) => EwtError::Yaml(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Replace every tagged node with its untagged content, recursively
fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => {
            let tagged = *tagged;
            log::trace!("Ignoring YAML tag {}", tagged.tag);
            strip_tags(tagged.value)
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(strip_tags).collect()),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (strip_tags(k), strip_tags(v)))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Remove `<<` entries that cannot be merged, so one bad merge key does not
/// stop the valid ones elsewhere in the document from being applied
fn drop_unmergeable(value: &mut Value) {
    match value {
        Value::Mapping(mapping) => {
            let mergeable = match mapping.get("<<") {
                None => true,
                Some(Value::Mapping(_)) => true,
                Some(Value::Sequence(items)) => items.iter().all(Value::is_mapping),
                Some(_) => false,
            };
            if !mergeable {
                log::debug!("Skipping YAML merge key whose source is not a mapping");
                mapping.remove("<<");
            }
            for (_, child) in mapping.iter_mut() {
                drop_unmergeable(child);
            }
        }
        Value::Sequence(items) => items.iter_mut().for_each(drop_unmergeable),
        _ => {}
    }
}

/// Walk nested mappings by key, e.g. `["esphome", "project", "version"]`
pub fn lookup<'a>(config: &'a Mapping, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = config.get(*first)?;
    for key in rest {
        current = current.as_mapping()?.get(*key)?;
    }
    Some(current)
}

/// Render a scalar as text; null, sequences and mappings have no text form
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
