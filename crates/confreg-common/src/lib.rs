//! confreg Common - Shared types and error kinds
//!
//! This crate provides the foundational types used across all confreg components:
//! - Error kinds and error codes
//! - Entity kinds that partition the key-space

pub mod error;

// Re-exports for convenience
pub use error::{ErrorCode, RegistryError};

/// Result alias used by the store adapter and the repositories
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Entity category, used as the top-level key-space partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Configuration,
    Group,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Configuration => "configuration",
            EntityKind::Group => "group",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "configuration" => Ok(EntityKind::Configuration),
            "group" => Ok(EntityKind::Group),
            _ => Err(format!("Invalid entity kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind() {
        assert_eq!(EntityKind::Configuration.as_str(), "configuration");
        assert_eq!(EntityKind::Group.to_string(), "group");
        assert_eq!(
            "configuration".parse::<EntityKind>().unwrap(),
            EntityKind::Configuration
        );
        assert_eq!("group".parse::<EntityKind>().unwrap(), EntityKind::Group);
        assert!("config".parse::<EntityKind>().is_err());
    }
}
