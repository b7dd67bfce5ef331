//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `DASHBOARD__<SECTION>__<KEY>`
//! environment variables.
//!
//! See `settings.toml` for the configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    pub max_per_page: u64,
}

#[derive(Debug, Deserialize)]
pub struct Seed {
    pub url: String,
    pub timeout_secs: u64,
    pub on_startup: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub seed: Seed,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(
                    Environment::with_prefix("DASHBOARD")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 5001_i64)?
            .set_default("server.database", "memory")?
            .set_default("server.max_per_page", engine::DEFAULT_MAX_PER_PAGE as i64)?
            .set_default("seed.url", engine::DEFAULT_DATASET_URL)?
            .set_default("seed.timeout_secs", 30_i64)?
            .set_default("seed.on_startup", false)?
            .build()?
            .try_deserialize()
    }
}
