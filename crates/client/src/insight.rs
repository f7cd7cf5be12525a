//! Client for the third-party text-generation endpoint used for dashboard
//! insights.
//!
//! One `POST` per request with the prompt wrapped as
//! `{"contents":[{"parts":[{"text": ...}]}]}`. A response whose text cannot
//! be found yields [`FALLBACK_INSIGHT`] rather than an error.

use std::fmt::Write;
use std::time::Duration;

use serde_json::{json, Value};
use shipcheck_core::utility::ConsumptionSummary;

use crate::config::InsightConfig;

/// Text returned when the response carries no candidate text.
pub const FALLBACK_INSIGHT: &str = "No insights available at the moment.";

/// Errors from the insight endpoint.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// No API key configured.
    #[error("insight API key is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Insight API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the insight endpoint.
pub struct InsightClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl std::fmt::Debug for InsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl InsightClient {
    /// Build a client from configuration. Fails with
    /// [`InsightError::NotConfigured`] when no key is set.
    pub fn new(config: &InsightConfig, timeout: Duration) -> Result<Self, InsightError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(InsightError::NotConfigured)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, config.api_url.clone(), api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Send `prompt` and return the generated text.
    pub async fn fetch_insight(&self, prompt: &str) -> Result<String, InsightError> {
        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Insight request rejected");
            return Err(InsightError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        Ok(extract_insight_text(&body))
    }
}

/// Request payload for `prompt`.
pub fn request_body(prompt: &str) -> Value {
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

/// Read `candidates[0].content.parts[0].text`, or the fallback text when any
/// step of that path is missing.
pub fn extract_insight_text(body: &Value) -> String {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_INSIGHT.to_string())
}

/// Prompt asking for observations on a consumption summary.
pub fn consumption_prompt(summary: &ConsumptionSummary) -> String {
    let mut prompt = String::from(
        "Analyse the following utility consumption and suggest ways to reduce cost.\n",
    );
    for totals in &summary.by_utility {
        let _ = writeln!(
            prompt,
            "- {}: {} readings, usage {:.2}, cost {:.2}",
            totals.utility.as_str(),
            totals.readings,
            totals.total_usage,
            totals.total_cost
        );
    }
    for supplier in &summary.by_supplier {
        let _ = writeln!(
            prompt,
            "- supplier {}: cost {:.2}",
            supplier.supplier, supplier.total_cost
        );
    }
    let _ = writeln!(prompt, "Total cost: {:.2}", summary.total_cost);
    prompt
}
