use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration.
///
/// Sources, later ones winning: built-in defaults, an optional `trivia.toml`
/// in the working directory, then `TRIVIA_*` environment variables (a `.env`
/// file is loaded into the environment first).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db?mode=rwc")?
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("max_connections", 5)
    }
}
