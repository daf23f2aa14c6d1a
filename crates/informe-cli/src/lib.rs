//! CLI library components for the report generator.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
