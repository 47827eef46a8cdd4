use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub alert: AlertConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub hunter: HunterConfig,
    pub endpoints: EndpointConfig,
}

/// Destination for positive hits. Both fields are set or neither is.
#[derive(Debug, Clone, Default)]
pub struct AlertConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct HunterConfig {
    pub workers: usize,
    pub attempts: u32,
    pub failure_delay: Duration,
    pub empty_delay: Duration,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub marketplace_url: String,
    pub profile_url: String,
    pub trusted_list_host: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{present} is set but {missing} is not")]
    Incomplete {
        present: &'static str,
        missing: &'static str,
    },
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
