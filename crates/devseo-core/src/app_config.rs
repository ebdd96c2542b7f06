use std::net::SocketAddr;

use crate::site::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub site_url: String,
    pub default_locale: Locale,
    pub dataforseo_auth_token: String,
    pub dataforseo_base_url: String,
    pub dataforseo_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("site_url", &self.site_url)
            .field("default_locale", &self.default_locale)
            .field("dataforseo_auth_token", &"[redacted]")
            .field("dataforseo_base_url", &self.dataforseo_base_url)
            .field("dataforseo_timeout_secs", &self.dataforseo_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
