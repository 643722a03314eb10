pub mod app_config;
pub mod categories;
pub mod config;
pub mod contact;
pub mod content;
pub mod products;
pub mod reference;
pub mod rich_text;

pub use app_config::{AppConfig, CmsConfig, Environment};
pub use categories::{Category, CategoryPage};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{Faq, HomeContent, Image};
pub use products::{Price, Product};
pub use reference::CatalogRef;
pub use rich_text::{Block, Inline, ListFormat, ListItem, RichText};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
