// Main library module for confreg - a versioned configuration registry server

pub mod api; // API handlers and routes
pub mod error; // Error handling and types
pub mod model; // Configuration, application state and response envelopes
pub mod startup; // Application startup utilities
