//! `${var}` substitution expansion

use super::loader::scalar_to_string;
use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"));

const SUBSTITUTIONS_KEY: &str = "substitutions";

/// Values from a config's `substitutions:` block
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: HashMap<String, String>,
}

impl Substitutions {
    /// Collect scalar substitutions from the top-level `substitutions:` block
    pub fn from_config(config: &Mapping) -> Self {
        let mut values = HashMap::new();

        if let Some(block) = config.get(SUBSTITUTIONS_KEY).and_then(Value::as_mapping) {
            for (key, value) in block {
                let (Some(key), Some(value)) = (scalar_to_string(key), scalar_to_string(value))
                else {
                    log::debug!("Ignoring non-scalar substitution {:?}", key);
                    continue;
                };
                values.insert(key, value);
            }
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Expand known `${name}` placeholders in a single pass
    pub fn expand_str(&self, input: &str) -> String {
        if self.values.is_empty() || !input.contains("${") {
            return input.to_string();
        }

        PLACEHOLDER
            .replace_all(input, |caps: &Captures| match self.values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Expand every string scalar in a value tree. Mapping keys are untouched.
    pub fn expand_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.expand_str(s)),
            Value::Sequence(items) => {
                Value::Sequence(items.iter().map(|item| self.expand_value(item)).collect())
            }
            Value::Mapping(mapping) => Value::Mapping(self.expand_mapping(mapping)),
            other => other.clone(),
        }
    }

    /// Expand a whole config, leaving the `substitutions:` block as written
    pub fn expand_config(&self, config: &Mapping) -> Mapping {
        config
            .iter()
            .map(|(key, value)| {
                if key.as_str() == Some(SUBSTITUTIONS_KEY) {
                    (key.clone(), value.clone())
                } else {
                    (key.clone(), self.expand_value(value))
                }
            })
            .collect()
    }

    fn expand_mapping(&self, mapping: &Mapping) -> Mapping {
        mapping
            .iter()
            .map(|(key, value)| (key.clone(), self.expand_value(value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::{load_config_str, lookup};

    fn config() -> Mapping {
        load_config_str(
            r#"
substitutions:
  name: office-sensor
  friendly_name: Office Sensor
  version: 2
  debug: false
  chained: ${name}-v2
  pins: [GPIO4]
esphome:
  name: ${name}
  friendly_name: "${friendly_name} (${missing})"
  project:
    name: acme.${name}
    version: 1.${version}.0
logger:
  level: ${debug}
sensor:
  - platform: dht
    name: ${friendly_name} Temperature
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_collects_scalar_substitutions() {
        let subs = Substitutions::from_config(&config());
        assert_eq!(subs.len(), 5);
        assert_eq!(subs.get("version"), Some("2"));
        assert_eq!(subs.get("debug"), Some("false"));
        assert_eq!(subs.get("pins"), None);
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let subs = Substitutions::from_config(&config());
        assert_eq!(
            subs.expand_str("${friendly_name} (${missing})"),
            "Office Sensor (${missing})"
        );
        assert_eq!(subs.expand_str("$name"), "$name");
    }

    #[test]
    fn test_expansion_is_single_pass() {
        let subs = Substitutions::from_config(&config());
        assert_eq!(subs.expand_str("${chained}"), "${name}-v2");
    }

    #[test]
    fn test_expand_config_walks_nested_values() {
        let config = config();
        let subs = Substitutions::from_config(&config);
        let expanded = subs.expand_config(&config);

        assert_eq!(
            lookup(&expanded, &["esphome", "name"]).and_then(Value::as_str),
            Some("office-sensor")
        );
        assert_eq!(
            lookup(&expanded, &["esphome", "project", "version"]).and_then(Value::as_str),
            Some("1.2.0")
        );
        assert_eq!(
            lookup(&expanded, &["logger", "level"]).and_then(Value::as_str),
            Some("false")
        );
        let sensors = expanded.get("sensor").and_then(Value::as_sequence).unwrap();
        assert_eq!(
            sensors[0].get("name").and_then(Value::as_str),
            Some("Office Sensor Temperature")
        );
    }

    #[test]
    fn test_substitutions_block_is_preserved() {
        let config = config();
        let expanded = Substitutions::from_config(&config).expand_config(&config);
        assert_eq!(
            lookup(&expanded, &["substitutions", "chained"]).and_then(Value::as_str),
            Some("${name}-v2")
        );
    }

    #[test]
    fn test_config_without_substitutions_is_unchanged() {
        let config = load_config_str("esphome:\n  name: ${name}\n").unwrap();
        let subs = Substitutions::from_config(&config);
        assert!(subs.is_empty());
        assert_eq!(subs.expand_config(&config), config);
    }
}
