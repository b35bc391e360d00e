//! Data models module
//!
//! - `constants` - Configuration property names and defaults
//! - `config` - Configuration loading and typed accessors
//! - `response` - HTTP response envelopes
//! - `app_state` - Repositories and store handle shared across handlers

pub mod app_state;
pub mod config;
pub mod constants;
pub mod response;

pub use app_state::AppState;
pub use config::Configuration;
pub use response::Result;
