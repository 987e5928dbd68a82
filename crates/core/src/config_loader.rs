use crate::config::EngineConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";
const ENV_PREFIX: &str = "OPTIONS_RISK_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads engine configuration by layering defaults, `config/Config.toml`
    /// and `OPTIONS_RISK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load() -> Result<EngineConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads engine configuration from a specific TOML file.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<EngineConfig> {
        let figment = Self::base().merge(Toml::file(path.as_ref()));
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Loads engine configuration with a profile overlay (`config/Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load_with_profile(profile: &str) -> Result<EngineConfig> {
        let figment = Self::base()
            .merge(Toml::file(DEFAULT_CONFIG_PATH))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(EngineConfig::default()))
    }

    fn extract(figment: Figment) -> Result<EngineConfig> {
        let config: EngineConfig = figment
            .extract()
            .context("failed to parse engine configuration")?;
        config.validate()?;
        tracing::debug!(
            weekly_rate = %config.decay.weekly_rate,
            days_per_period = config.decay.days_per_period,
            max_periods = config.decay.max_periods,
            "Loaded engine configuration"
        );
        Ok(config)
    }
}
