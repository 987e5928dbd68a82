//! Shared configuration for the options risk engine.

pub mod config;
pub mod config_loader;

pub use config::{DecayConfig, EngineConfig, LoggingConfig};
pub use config_loader::ConfigLoader;
