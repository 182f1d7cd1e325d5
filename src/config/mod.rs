//! Configuration management for Kubetalk

pub mod config;
pub mod output;
pub mod sample;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::{Config, CONFIG_VERSION};
pub use output::{OutputConfig, OutputFormat};
pub use sample::SampleConfig;
pub use validation::ValidationConfig;
