//! Boundary types and configuration shared by the lead discovery crates.

pub mod app_config;
pub mod candidate;
pub mod channel;
pub mod config;

pub use app_config::{AppConfig, LlmProvider};
pub use candidate::{ScoredCandidate, SearchRequest};
pub use channel::Channel;
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
