// Configuration entry model
// A flat label-key -> label-value mapping stored under (id, version)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub entries: HashMap<String, String>,
    pub id: String,
    pub version: String,
}

impl Configuration {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_field_names() {
        let config = Configuration {
            id: "abc".to_string(),
            ..Configuration::new("v1").with_entry("env", "prod")
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["version"], "v1");
        assert_eq!(json["entries"]["env"], "prod");
    }

    #[test]
    fn test_configuration_missing_fields_default() {
        let config: Configuration = serde_json::from_str(r#"{"version":"v2"}"#).unwrap();
        assert_eq!(config.version, "v2");
        assert!(config.id.is_empty());
        assert!(config.entries.is_empty());
    }
}
