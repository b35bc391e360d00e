//! In-place replace state machine
//!
//! A delete-then-write replace moves the stored key through
//! `Present -> Deleting -> Absent -> Writing -> Present`. The two store calls
//! are not atomic. If the sequence stops in `Absent` or `Writing`, the old
//! version is gone and the new one was never stored, so readers see
//! `NotFound` until the caller writes the group again. Nothing here repairs
//! that; the progress tracker only records and reports it.

use std::fmt::{Display, Formatter};

use confreg_common::RegistryError;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceState {
    /// Old value removed, new value not yet written
    Absent,
    /// Old value being removed
    Deleting,
    /// New value being written
    Writing,
    /// A value is stored (the old one before, the new one after)
    Present,
}

impl ReplaceState {
    fn can_advance_to(self, next: ReplaceState) -> bool {
        matches!(
            (self, next),
            (ReplaceState::Present, ReplaceState::Deleting)
                | (ReplaceState::Deleting, ReplaceState::Absent)
                | (ReplaceState::Absent, ReplaceState::Writing)
                | (ReplaceState::Writing, ReplaceState::Present)
        )
    }
}

impl Display for ReplaceState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReplaceState::Absent => "absent",
            ReplaceState::Deleting => "deleting",
            ReplaceState::Writing => "writing",
            ReplaceState::Present => "present",
        };
        write!(f, "{}", name)
    }
}

/// Tracks one replace of one key
#[derive(Debug)]
pub struct ReplaceProgress {
    key: String,
    state: ReplaceState,
}

impl ReplaceProgress {
    /// Start tracking a key whose current value has been confirmed present
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ReplaceState::Present,
        }
    }

    #[cfg(test)]
    fn state(&self) -> ReplaceState {
        self.state
    }

    pub fn advance(&mut self, next: ReplaceState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid replace transition {} -> {}",
            self.state,
            next
        );
        debug!(key = %self.key, from = %self.state, to = %next, "replace transition");
        self.state = next;
    }

    /// True when stopping now leaves the key without any value
    fn leaves_gap(&self) -> bool {
        matches!(self.state, ReplaceState::Absent | ReplaceState::Writing)
    }

    /// Report a failed step
    pub fn fail(&self, err: &RegistryError) {
        if self.leaves_gap() {
            error!(
                key = %self.key,
                state = %self.state,
                error = %err,
                "replace interrupted after delete; key is absent until rewritten"
            );
            return;
        }
        match self.state {
            ReplaceState::Deleting => warn!(
                key = %self.key,
                error = %err,
                "replace failed while deleting; old value may or may not remain"
            ),
            _ => warn!(
                key = %self.key,
                error = %err,
                "replace failed before any change"
            ),
        }
    }
}
