pub mod app_config;
pub mod config;
pub mod keywords;
pub mod site;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{
    BacklinkStats, CompetitionLevel, KeywordPage, KeywordRecord, LanguageOption,
    LocationLanguage, MonthlySearch, QueryKind, SearchIntent,
};
pub use site::{negotiate_locale, sitemap_xml, Locale, NavItem, SiteConfig, SiteError, Theme};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
