use std::env;

use anyhow::{Context, Result};
use reqwest::Url;

static ENV_API_URL: &str = "TIX_API_URL";
static DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Where the remote task service lives.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Resolve the service base URL from the provided override, the
    /// environment, and the built-in default, in that order.
    pub fn resolve(base_url_override: Option<String>) -> Result<Self> {
        let raw = base_url_override
            .or_else(|| env::var(ENV_API_URL).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::from_base_url(raw)
    }

    /// Construct [`ApiConfig`] directly from a base URL.
    pub fn from_base_url<T: Into<String>>(url: T) -> Result<Self> {
        let raw = url.into();
        Url::parse(&raw).with_context(|| format!("Invalid task service URL '{}'", raw))?;
        // Endpoint paths are joined with a single '/'.
        let base_url = raw.trim_end_matches('/').to_string();
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
