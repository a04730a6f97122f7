use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: listen port and observability knobs.
///
/// Values come from an optional `configuration.*` file, then from the
/// process environment (`PORT`, `LOG_LEVEL`, `OTLP_ENDPOINT`).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load_from(config::Environment::default())
    }

    /// Build from the optional `configuration.*` file overlaid with `env`.
    pub fn load_from(env: config::Environment) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(env.try_parsing(true))
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.otlp_endpoint = config
            .otlp_endpoint
            .filter(|endpoint| !endpoint.trim().is_empty());
        Ok(config)
    }
}
