use crate::telemetry::LogFormat;

/// Default Gemini-style `generateContent` endpoint for insights.
pub const DEFAULT_INSIGHT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Default bucket holding checklist evidence.
pub const DEFAULT_MEDIA_BUCKET: &str = "survey-media";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Insight endpoint settings. Insights are disabled when no key is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend project URL, e.g. `https://xyz.example.co`.
    pub backend_url: String,
    /// Public API key sent with every backend call.
    pub backend_anon_key: String,
    /// Bucket holding media evidence (default: `survey-media`).
    pub media_bucket: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Log output format (default: `pretty`).
    pub log_format: LogFormat,
    pub insight: InsightConfig,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the backend endpoint.
    pub fn new(backend_url: impl Into<String>, backend_anon_key: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            backend_anon_key: backend_anon_key.into(),
            media_bucket: DEFAULT_MEDIA_BUCKET.to_string(),
            request_timeout_secs: 30,
            log_format: LogFormat::Pretty,
            insight: InsightConfig {
                api_url: DEFAULT_INSIGHT_API_URL.to_string(),
                api_key: None,
            },
        }
    }

    /// Load configuration from the process environment, reading `.env`
    /// first if present.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `BACKEND_URL`          | required                   |
    /// | `BACKEND_ANON_KEY`     | required                   |
    /// | `MEDIA_BUCKET`         | `survey-media`             |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LOG_FORMAT`           | `pretty`                   |
    /// | `INSIGHT_API_URL`      | Gemini `generateContent`   |
    /// | `INSIGHT_API_KEY`      | unset (insights disabled)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend_url = non_empty("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        let backend_anon_key =
            non_empty("BACKEND_ANON_KEY").ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let mut config = Self::new(backend_url, backend_anon_key);

        if let Some(bucket) = non_empty("MEDIA_BUCKET") {
            config.media_bucket = bucket;
        }

        if let Some(raw) = non_empty("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT_SECS",
                    expected: "positive integer",
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = non_empty("LOG_FORMAT") {
            config.log_format = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "LOG_FORMAT",
                expected: "log format (pretty, json)",
                value: raw.clone(),
            })?;
        }

        if let Some(url) = non_empty("INSIGHT_API_URL") {
            config.insight.api_url = url;
        }
        config.insight.api_key = non_empty("INSIGHT_API_KEY");

        Ok(config)
    }
}
