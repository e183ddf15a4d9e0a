// src/config.rs
use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5005/webhooks/rest/webhook";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub webhook: WebhookConfig,
    /// Idle time after which a page view's widget is dropped.
    pub widget_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout: Duration,
    /// Extra attempts after the first one. Zero means a single attempt.
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 0,
            retry_delay_ms: 250,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            webhook: WebhookConfig::default(),
            widget_ttl: Duration::from_secs(1800),
        }
    }
}

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let bind_addr = parse_or(&lookup, "WIDGET_BIND_ADDR", defaults.bind_addr)?;
        let url = lookup("RASA_WEBHOOK_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.webhook.url);
        let timeout_secs = parse_or(
            &lookup,
            "WEBHOOK_TIMEOUT_SECS",
            defaults.webhook.timeout.as_secs(),
        )?;
        let max_retries = parse_or(&lookup, "WEBHOOK_MAX_RETRIES", defaults.webhook.max_retries)?;
        let ttl_secs = parse_or(&lookup, "WIDGET_TTL_SECS", defaults.widget_ttl.as_secs())?;

        Ok(Self {
            bind_addr,
            webhook: WebhookConfig {
                url,
                timeout: Duration::from_secs(timeout_secs),
                max_retries,
                retry_delay_ms: defaults.webhook.retry_delay_ms,
            },
            widget_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(default),
    }
}
