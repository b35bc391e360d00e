//! HTTP request layer
//!
//! Handlers translate requests into repository calls and render the result
//! as JSON. Errors are mapped to status codes by [`crate::error::AppError`].

pub mod config;
pub mod group;
pub mod health;
pub mod model;
pub mod route;
