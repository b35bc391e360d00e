//! Key-space codec
//!
//! Maps `(kind, id, version)` onto hierarchical store keys:
//!
//! | Key                          | Lists                          |
//! |------------------------------|--------------------------------|
//! | `{kind}/`                    | every entity of a kind         |
//! | `{kind}/{id}/`               | every version of one id        |
//! | `{kind}/{id}/{version}`      | one stored entity              |
//!
//! Prefixes always end in the separator, so listing id `ab` never picks up
//! versions of id `abc`.

use confreg_common::{EntityKind, RegistryError, Result};

pub const KEY_SEPARATOR: char = '/';

/// A store key decomposed into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: String,
    pub version: String,
}

pub fn key_for_version(kind: EntityKind, id: &str, version: &str) -> String {
    format!("{}{}", key_prefix_for_id(kind, id), version)
}

pub fn key_prefix_for_id(kind: EntityKind, id: &str) -> String {
    format!("{}{}{}", key_prefix_for_kind(kind), id, KEY_SEPARATOR)
}

pub fn key_prefix_for_kind(kind: EntityKind) -> String {
    format!("{}{}", kind.as_str(), KEY_SEPARATOR)
}

/// Inverse of [`key_for_version`]. The version part may itself contain `/`.
pub fn parse_key(key: &str) -> Option<EntityKey> {
    let mut parts = key.splitn(3, KEY_SEPARATOR);
    let kind = parts.next()?.parse::<EntityKind>().ok()?;
    let id = parts.next()?;
    let version = parts.next()?;
    if id.is_empty() {
        return None;
    }

    Some(EntityKey {
        kind,
        id: id.to_string(),
        version: version.to_string(),
    })
}

/// Draw a fresh identifier (random UUID v4)
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Reject ids that would escape their `{kind}/{id}/` partition
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(RegistryError::InvalidArgument("id must not be empty".to_string()));
    }
    if id.contains(KEY_SEPARATOR) {
        return Err(RegistryError::InvalidArgument(format!(
            "id '{}' must not contain '{}'",
            id, KEY_SEPARATOR
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(
            key_for_version(EntityKind::Configuration, "abc", "v1"),
            "configuration/abc/v1"
        );
        assert_eq!(key_prefix_for_id(EntityKind::Group, "abc"), "group/abc/");
        assert_eq!(key_prefix_for_kind(EntityKind::Group), "group/");
    }

    #[test]
    fn test_version_key_is_under_its_prefixes() {
        let key = key_for_version(EntityKind::Group, "g1", "2024-01");
        assert!(key.starts_with(&key_prefix_for_id(EntityKind::Group, "g1")));
        assert!(key.starts_with(&key_prefix_for_kind(EntityKind::Group)));
        assert!(!key.starts_with(&key_prefix_for_id(EntityKind::Group, "g")));
        assert!(!key.starts_with(&key_prefix_for_kind(EntityKind::Configuration)));
    }

    #[test]
    fn test_parse_key() {
        let key = key_for_version(EntityKind::Configuration, "abc", "release/2");
        assert_eq!(
            parse_key(&key),
            Some(EntityKey {
                kind: EntityKind::Configuration,
                id: "abc".to_string(),
                version: "release/2".to_string(),
            })
        );

        assert_eq!(parse_key("group/abc"), None);
        assert_eq!(parse_key("unknown/abc/v1"), None);
        assert_eq!(parse_key("group//v1"), None);
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(validate_id(&a).is_ok());
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("abc").is_ok());
        assert!(matches!(
            validate_id(""),
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_id("a/b"),
            Err(RegistryError::InvalidArgument(_))
        ));
    }
}
