//! Shared configuration for the WikiDash binaries.

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_API_BASE_URL, DEFAULT_PAGEVIEWS_BASE_URL,
    DEFAULT_USER_AGENT,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
