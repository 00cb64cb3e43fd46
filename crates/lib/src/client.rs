//! Shared LINE Messaging API client.
//!
//! One `reqwest::Client` bound to the API root with bearer auth and JSON content type as
//! default headers. Build it once at startup and hand clones to whatever issues requests;
//! clones share the connection pool.

use crate::config::{redact_secret, BotSettings, ConfigError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Pre-configured HTTP client for the LINE Messaging API.
#[derive(Clone)]
pub struct LineClient {
    base_url: String,
    client: reqwest::Client,
}

impl LineClient {
    /// Build the client from resolved settings. Logs the base URL and a redacted token.
    pub fn new(settings: &BotSettings) -> Result<Self, ConfigError> {
        let base_url = settings.api_url.trim_end_matches('/').to_string();
        let headers = default_headers(&settings.channel_token)?;
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout);
        if settings.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        log::info!("LINE API base URL: {}", base_url);
        log::info!(
            "LINE channel token: {}",
            redact_secret(&settings.channel_token)
        );
        Ok(Self { base_url, client })
    }

    /// API root as configured, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API root (e.g. "/message/push").
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST to a path relative to the API root; default headers are already attached.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn default_headers(token: &str) -> Result<HeaderMap, ConfigError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ConfigError::InvalidToken)?;
    auth.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = LineClient::new(&BotSettings::new("https://api.line.me/v2/bot/", "tok")).unwrap();
        assert_eq!(client.base_url(), "https://api.line.me/v2/bot");
        assert_eq!(
            client.url("/message/push"),
            "https://api.line.me/v2/bot/message/push"
        );
    }

    #[test]
    fn default_headers_carry_bearer_and_json() {
        let headers = default_headers("abc").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = LineClient::new(&BotSettings::new("http://localhost", "bad\ntoken")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken));
    }

    #[test]
    fn debug_does_not_expose_headers() {
        let client = LineClient::new(&BotSettings::new("http://localhost", "secret-token-value")).unwrap();
        let dbg = format!("{:?}", client);
        assert!(!dbg.contains("secret-token-value"));
    }
}
