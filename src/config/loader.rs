use std::{env, thread, time::Duration};

use super::env::{
    AlertConfig, AppConfig, ConfigError, DirectoryConfig, EndpointConfig, HunterConfig,
    LoggingConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = var("TELEGRAM_BOT_TOKEN");
        let chat_id = match var("TELEGRAM_CHAT_ID") {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
                key: "TELEGRAM_CHAT_ID",
                value: raw.clone(),
            })?),
            None => None,
        };
        match (&bot_token, &chat_id) {
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    present: "TELEGRAM_BOT_TOKEN",
                    missing: "TELEGRAM_CHAT_ID",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    present: "TELEGRAM_CHAT_ID",
                    missing: "TELEGRAM_BOT_TOKEN",
                })
            }
            _ => {}
        }
        let alert = AlertConfig { bot_token, chat_id };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let default_workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        let hunter = HunterConfig {
            workers: parse_or(&var, "HUNTER_WORKERS", default_workers).max(1),
            attempts: parse_or(&var, "HUNTER_ATTEMPTS", 3u32).max(1),
            failure_delay: Duration::from_millis(parse_or(&var, "HUNTER_FAILURE_DELAY_MS", 3_000)),
            empty_delay: Duration::from_millis(parse_or(&var, "HUNTER_EMPTY_DELAY_MS", 2_000)),
            request_timeout: Duration::from_millis(parse_or(
                &var,
                "HUNTER_REQUEST_TIMEOUT_MS",
                15_000,
            )),
        };

        let endpoints = EndpointConfig {
            marketplace_url: trim_origin(
                var("MARKETPLACE_URL").unwrap_or_else(|| "https://fragment.com".to_string()),
            ),
            profile_url: trim_origin(
                var("PROFILE_URL").unwrap_or_else(|| "https://t.me".to_string()),
            ),
            trusted_list_host: var("TRUSTED_LIST_HOST")
                .unwrap_or_else(|| "raw.githubusercontent.com".to_string()),
        };

        Ok(Self {
            alert,
            directories,
            logging,
            hunter,
            endpoints,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn trim_origin(value: String) -> String {
    value.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]).expect("defaults");
        assert!(config.alert.bot_token.is_none());
        assert_eq!(config.hunter.attempts, 3);
        assert_eq!(config.hunter.failure_delay, Duration::from_secs(3));
        assert_eq!(config.hunter.empty_delay, Duration::from_secs(2));
        assert!(config.hunter.workers >= 1);
        assert_eq!(config.endpoints.marketplace_url, "https://fragment.com");
        assert_eq!(config.endpoints.trusted_list_host, "raw.githubusercontent.com");
    }

    #[test]
    fn token_without_chat_is_rejected() {
        let err = config_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete { .. }));
    }

    #[test]
    fn bad_numbers_fall_back_and_origins_are_trimmed() {
        let config = config_from(&[
            ("HUNTER_WORKERS", "0"),
            ("HUNTER_ATTEMPTS", "lots"),
            ("MARKETPLACE_URL", "http://127.0.0.1:8080/"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-10042"),
        ])
        .expect("config");
        assert_eq!(config.hunter.workers, 1);
        assert_eq!(config.hunter.attempts, 3);
        assert_eq!(config.endpoints.marketplace_url, "http://127.0.0.1:8080");
        assert_eq!(config.alert.chat_id, Some(-10042));
    }
}
