use thiserror::Error;

mod app_config;
mod campaign;
mod candidate;
mod config;
pub mod defaults;
mod query;

pub use app_config::AppConfig;
pub use campaign::{Campaign, CampaignStatus, SearchMode};
pub use candidate::Candidate;
pub use config::{load_app_config, load_app_config_from_env};
pub use query::build_search_query;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
