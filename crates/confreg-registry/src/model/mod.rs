//! Domain models stored in the registry

pub mod configuration;
pub mod group;

pub use configuration::Configuration;
pub use group::{ConfigurationInGroup, Group};

use serde::{Deserialize, Serialize};

/// Confirmation returned by a successful delete
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub deleted: String,
}
