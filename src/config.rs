use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_url: String,
    pub default_username: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url)?;

        let default_username = env::var("GITHUB_USERNAME")
            .ok()
            .filter(|name| !name.trim().is_empty());

        Ok(Self {
            github_token,
            api_url,
            default_username,
        })
    }
}

/// Validates the API base URL and strips any trailing slash.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid GITHUB_API_URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.as_str().trim_end_matches('/').to_string()),
        other => Err(Error::Config(format!(
            "Unsupported GITHUB_API_URL scheme: {}",
            other
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub recent_repos_limit: usize,
    pub recent_activity_limit: usize,
    pub use_contribution_calendar: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            recent_repos_limit: 6,
            recent_activity_limit: 10,
            use_contribution_calendar: true,
        }
    }
}

impl From<&Config> for AggregatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            use_contribution_calendar: config.github_token.is_some(),
            ..Self::default()
        }
    }
}
