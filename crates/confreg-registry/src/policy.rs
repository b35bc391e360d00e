//! Write policies selectable per repository

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// What `create` does when the target `(id, version)` key already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Write anyway, replacing the stored value
    OverwriteOnConflict,
    /// Fail with `AlreadyExists`; the check and the write are a single
    /// create-only compare-and-swap
    RejectOnConflict,
}

impl Display for ConflictPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::OverwriteOnConflict => write!(f, "overwrite"),
            ConflictPolicy::RejectOnConflict => write!(f, "reject"),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" | "overwrite-on-conflict" => Ok(ConflictPolicy::OverwriteOnConflict),
            "reject" | "reject-on-conflict" => Ok(ConflictPolicy::RejectOnConflict),
            _ => Err(format!("Invalid conflict policy: {}", s)),
        }
    }
}

/// How a group version is replaced in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceStrategy {
    /// Delete the key, then write it again. Not atomic: a failure between
    /// the two steps leaves the group absent.
    #[default]
    DeleteThenWrite,
    /// Swap the value against the modify index read beforehand
    CompareAndSwap,
}

impl Display for ReplaceStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplaceStrategy::DeleteThenWrite => write!(f, "delete-then-write"),
            ReplaceStrategy::CompareAndSwap => write!(f, "compare-and-swap"),
        }
    }
}

impl FromStr for ReplaceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delete-then-write" => Ok(ReplaceStrategy::DeleteThenWrite),
            "compare-and-swap" | "cas" => Ok(ReplaceStrategy::CompareAndSwap),
            _ => Err(format!("Invalid replace strategy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_policy_parse() {
        assert_eq!(
            "overwrite".parse::<ConflictPolicy>(),
            Ok(ConflictPolicy::OverwriteOnConflict)
        );
        assert_eq!(
            "Reject-On-Conflict".parse::<ConflictPolicy>(),
            Ok(ConflictPolicy::RejectOnConflict)
        );
        assert!("ignore".parse::<ConflictPolicy>().is_err());
        assert_eq!(ConflictPolicy::RejectOnConflict.to_string(), "reject");
    }

    #[test]
    fn test_replace_strategy_parse() {
        assert_eq!(ReplaceStrategy::default(), ReplaceStrategy::DeleteThenWrite);
        assert_eq!(
            "cas".parse::<ReplaceStrategy>(),
            Ok(ReplaceStrategy::CompareAndSwap)
        );
        assert_eq!(
            ReplaceStrategy::CompareAndSwap
                .to_string()
                .parse::<ReplaceStrategy>(),
            Ok(ReplaceStrategy::CompareAndSwap)
        );
        assert!("upsert".parse::<ReplaceStrategy>().is_err());
    }
}
