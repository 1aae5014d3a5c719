use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Days without a purchase before a client counts as inactive for
    /// dashboard metrics and inactivity alerts.
    #[serde(default = "default_inactivity_threshold_days")]
    pub inactivity_threshold_days: i64,

    /// Role allowed to see unmasked national ids and phone numbers in exports.
    #[serde(default = "default_privileged_role")]
    pub privileged_role: String,

    #[serde(default = "default_max_route_stops")]
    pub max_route_stops: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_inactivity_threshold_days() -> i64 {
    90
}

fn default_privileged_role() -> String {
    "admin".to_string()
}

fn default_max_route_stops() -> usize {
    9
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            inactivity_threshold_days: default_inactivity_threshold_days(),
            privileged_role: default_privileged_role(),
            max_route_stops: default_max_route_stops(),
        }
    }
}
