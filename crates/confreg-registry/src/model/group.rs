// Group model
// An ordered sequence of labelled configuration members stored under (id, version)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Group member.
///
/// Carries two same-shaped mappings. `labels` is the identifying label set
/// that label queries are matched against; it travels on the wire as
/// `labele`. `entries` holds the member's own configuration values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationInGroup {
    #[serde(rename = "labele")]
    pub labels: HashMap<String, String>,
    pub entries: HashMap<String, String>,
}

impl ConfigurationInGroup {
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub configs: Vec<ConfigurationInGroup>,
    pub id: String,
    pub version: String,
}

impl Group {
    pub fn new(version: impl Into<String>, configs: Vec<ConfigurationInGroup>) -> Self {
        Self {
            configs,
            id: String::new(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_wire_names() {
        let member = ConfigurationInGroup::default()
            .with_label("env", "prod")
            .with_entry("db.url", "mysql://db");

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["labele"]["env"], "prod");
        assert_eq!(json["entries"]["db.url"], "mysql://db");
    }

    #[test]
    fn test_group_decode() {
        let json = r#"{
            "id": "g1",
            "version": "v1",
            "configs": [
                {"labele": {"env": "prod"}, "entries": {"port": "80"}},
                {"labele": {"env": "dev"}}
            ]
        }"#;

        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.id, "g1");
        assert_eq!(group.configs.len(), 2);
        assert_eq!(group.configs[0].labels["env"], "prod");
        assert_eq!(group.configs[0].entries["port"], "80");
        assert!(group.configs[1].entries.is_empty());
    }
}
