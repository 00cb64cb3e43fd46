//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.line-gateway/config.json`) and environment.
//! The layout follows the `line.bot.*` property names used by LINE bot deployments:
//! `{ "line": { "bot": { "apiUrl": "...", "channelToken": "..." } } }`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Env var overriding `line.bot.apiUrl`.
pub const API_URL_ENV: &str = "LINE_API_URL";
/// Env var overriding `line.bot.channelToken`.
pub const CHANNEL_TOKEN_ENV: &str = "LINE_CHANNEL_TOKEN";
/// Env var overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "LINE_CONFIG_PATH";

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// LINE platform settings.
    #[serde(default)]
    pub line: LineConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    /// Messaging API bot settings.
    #[serde(default)]
    pub bot: BotConfig,
}

/// Messaging API bot config. Both `api_url` and `channel_token` must resolve (from here or env)
/// before a client can be built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// API root, e.g. "https://api.line.me/v2/bot". Overridden by LINE_API_URL env.
    pub api_url: Option<String>,

    /// Channel access token (long-lived). Overridden by LINE_CHANNEL_TOKEN env.
    pub channel_token: Option<String>,

    /// Total per-request timeout in seconds (default 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default 10).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Ignore HTTP(S)_PROXY env vars and connect directly (default false).
    #[serde(default)]
    pub no_proxy: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            channel_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            no_proxy: false,
        }
    }
}

/// Configuration that prevents the client from being built. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LINE API base URL is not configured (set line.bot.apiUrl or LINE_API_URL)")]
    MissingApiUrl,
    #[error("LINE channel token is not configured (set line.bot.channelToken or LINE_CHANNEL_TOKEN)")]
    MissingChannelToken,
    #[error("LINE channel token is not a valid header value")]
    InvalidToken,
    #[error("building http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Fully resolved bot settings: everything needed to build a [`crate::client::LineClient`].
#[derive(Clone)]
pub struct BotSettings {
    pub api_url: String,
    pub channel_token: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub no_proxy: bool,
}

impl BotSettings {
    pub fn new(api_url: impl Into<String>, channel_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            channel_token: channel_token.into(),
            timeout: Duration::from_secs(default_timeout_secs()),
            connect_timeout: Duration::from_secs(default_connect_timeout_secs()),
            no_proxy: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_no_proxy(mut self, no_proxy: bool) -> Self {
        self.no_proxy = no_proxy;
        self
    }
}

// Hand-written so the token never ends up in `{:?}` output.
impl std::fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotSettings")
            .field("api_url", &self.api_url)
            .field("channel_token", &redact_secret(&self.channel_token))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("no_proxy", &self.no_proxy)
            .finish()
    }
}

/// Trimmed, non-empty value: env wins over config.
fn pick_non_empty(env_value: Option<String>, config_value: Option<&String>) -> Option<String> {
    env_value
        .and_then(|s| {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        })
        .or_else(|| {
            config_value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// Resolve the API base URL: env LINE_API_URL overrides config.
pub fn resolve_api_url(config: &Config) -> Option<String> {
    pick_non_empty(
        std::env::var(API_URL_ENV).ok(),
        config.line.bot.api_url.as_ref(),
    )
}

/// Resolve the channel token: env LINE_CHANNEL_TOKEN overrides config.
pub fn resolve_channel_token(config: &Config) -> Option<String> {
    pick_non_empty(
        std::env::var(CHANNEL_TOKEN_ENV).ok(),
        config.line.bot.channel_token.as_ref(),
    )
}

/// Resolve everything needed to build the client. Missing URL or token is an error.
pub fn resolve_bot_settings(config: &Config) -> Result<BotSettings, ConfigError> {
    settings_from(
        resolve_api_url(config),
        resolve_channel_token(config),
        &config.line.bot,
    )
}

fn settings_from(
    api_url: Option<String>,
    channel_token: Option<String>,
    bot: &BotConfig,
) -> Result<BotSettings, ConfigError> {
    let api_url = api_url.ok_or(ConfigError::MissingApiUrl)?;
    let channel_token = channel_token.ok_or(ConfigError::MissingChannelToken)?;
    Ok(BotSettings::new(api_url, channel_token)
        .with_timeout(Duration::from_secs(bot.timeout_secs))
        .with_connect_timeout(Duration::from_secs(bot.connect_timeout_secs))
        .with_no_proxy(bot.no_proxy))
}

/// Loggable form of a secret: first four characters and the length.
pub fn redact_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return format!("***({} chars)", len);
    }
    let head: String = secret.chars().take(4).collect();
    format!("{}…({} chars)", head, len)
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|h| h.join(".line-gateway").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    })
}

/// Load config from the given path, or the default path (or LINE_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
