// config.rs
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{AppError, Result};

pub const DEFAULT_SUPPORT_EMAIL: &str = "support@hsjob.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_base_url: String,
    pub lookup_timeout: Duration,
    pub auto_check_delay: Duration,
    pub view_ttl: Duration,
    pub vnpay_hash_secret: Option<String>,
    pub confirm_callback_with_record: bool,
    pub support_email: String,
    pub cors_allow_any: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            backend_base_url: env::var("BACKEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),
            lookup_timeout: Duration::from_secs(parse_var("LOOKUP_TIMEOUT_SECS", 12)?),
            auto_check_delay: Duration::from_millis(parse_var("AUTO_CHECK_DELAY_MS", 1000)?),
            view_ttl: Duration::from_secs(parse_var("VIEW_TTL_SECS", 900)?),
            vnpay_hash_secret: env::var("VNPAY_HASH_SECRET")
                .ok()
                .filter(|secret| !secret.trim().is_empty()),
            confirm_callback_with_record: parse_var("CONFIRM_CALLBACK_WITH_RECORD", true)?,
            support_email: env::var("SUPPORT_EMAIL")
                .unwrap_or_else(|_| DEFAULT_SUPPORT_EMAIL.to_string()),
            cors_allow_any: parse_var("CORS_ALLOW_ANY", true)?,
        };

        if config.lookup_timeout.is_zero() {
            return Err(AppError::configuration("LOOKUP_TIMEOUT_SECS must be greater than 0"));
        }
        url::Url::parse(&config.backend_base_url)?;

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn get_config_info(&self) -> serde_json::Value {
        serde_json::json!({
            "backend_base_url": self.backend_base_url,
            "lookup_timeout_secs": self.lookup_timeout.as_secs(),
            "auto_check_delay_ms": self.auto_check_delay.as_millis(),
            "view_ttl_secs": self.view_ttl.as_secs(),
            "signature_verification": self.vnpay_hash_secret.is_some(),
            "confirm_callback_with_record": self.confirm_callback_with_record,
            "support_email": self.support_email,
            "port": self.port,
            "host": self.host,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            backend_base_url: "http://localhost:8080/api/v1".to_string(),
            lookup_timeout: Duration::from_secs(12),
            auto_check_delay: Duration::from_millis(1000),
            view_ttl: Duration::from_secs(900),
            vnpay_hash_secret: None,
            confirm_callback_with_record: true,
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
            cors_allow_any: true,
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::configuration(format!("{} is invalid ({}): {}", key, raw, e))),
        _ => Ok(default),
    }
}
