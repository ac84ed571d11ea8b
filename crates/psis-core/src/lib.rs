//! Shared configuration and domain types for the PSIS pesticide search tool.

mod app_config;
mod config;
mod rows;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use rows::{NormalizedRow, COLUMN_HEADERS, SENTINEL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
