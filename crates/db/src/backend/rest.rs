//! REST implementation of the store traits.
//!
//! Talks to a PostgREST-style table API under `/rest/v1` and an object
//! storage API under `/storage/v1`, authenticating every call with the
//! project API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;

use super::{BackendError, BlobStore, Filter, Query, RecordStore};

/// Ask the table API to echo written rows back.
const PREFER_REPRESENTATION: &str = "return=representation";

/// HTTP client for one backend project.
#[derive(Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl RestBackend {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, api_key)
    }

    /// Create a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: &str,
    ) -> Result<Self, BackendError> {
        let invalid = |reason: String| BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Append `segments` to the project URL, percent-encoding each one.
    ///
    /// Object paths may carry user-supplied file names, so `#`, `?` and
    /// spaces must stay inside their segment.
    fn url_with<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        // Always succeeds: `with_client` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn table_url(&self, table: &str) -> Url {
        self.url_with(["rest", "v1", table])
    }

    fn object_url(&self, bucket: &str, path: &str) -> Url {
        self.url_with(["storage", "v1", "object", bucket].into_iter().chain(path.split('/')))
    }

    fn upload_request(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(self.object_url(bucket, path)))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`BackendError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_rows(response: reqwest::Response) -> Result<Vec<Value>, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Vec<Value>>().await?)
    }
}

/// Translate filters into `column=eq.value` query pairs.
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
        .collect()
}

/// Translate a [`Query`] into table API query pairs.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(filter_params(&query.filters));
    if let Some((column, direction)) = &query.order {
        params.push(("order".to_string(), format!("{column}.{}", direction.as_str())));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

#[async_trait]
impl RecordStore for RestBackend {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        let response = self
            .authorize(self.client.post(self.table_url(table)))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&row)
            .send()
            .await?;

        Self::parse_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::EmptyResponse {
                table: table.to_string(),
            })
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Value,
    ) -> Result<Vec<Value>, BackendError> {
        let response = self
            .authorize(self.client.patch(self.table_url(table)))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&filter_params(filters))
            .json(&changes)
            .send()
            .await?;

        Self::parse_rows(response).await
    }

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        let response = self
            .authorize(self.client.get(self.table_url(table)))
            .query(&query_params(query))
            .send()
            .await?;

        Self::parse_rows(response).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<u64, BackendError> {
        let response = self
            .authorize(self.client.delete(self.table_url(table)))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&filter_params(filters))
            .send()
            .await?;

        Ok(Self::parse_rows(response).await?.len() as u64)
    }
}

#[async_trait]
impl BlobStore for RestBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .upload_request(bucket, path, bytes, content_type)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        let response = self
            .authorize(
                self.client
                    .delete(self.url_with(["storage", "v1", "object", bucket])),
            )
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.url_with(
            ["storage", "v1", "object", "public", bucket]
                .into_iter()
                .chain(path.split('/')),
        )
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Direction;
    use assert_matches::assert_matches;
    use shipcheck_core::checklist::EvidenceType;
    use shipcheck_core::media::{media_file_name, media_storage_path};
    use uuid::Uuid;

    fn backend() -> RestBackend {
        RestBackend::with_client(reqwest::Client::new(), "https://proj.example.co/", "anon")
            .unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let b = backend();
        assert_eq!(
            b.table_url("surveys").as_str(),
            "https://proj.example.co/rest/v1/surveys"
        );
        assert_eq!(
            b.object_url("survey-media", "checklist/a/b/c.jpg").as_str(),
            "https://proj.example.co/storage/v1/object/survey-media/checklist/a/b/c.jpg"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let b = RestBackend::with_client(reqwest::Client::new(), "http://localhost:54321/proj", "k")
            .unwrap();
        assert_eq!(
            b.table_url("surveys").as_str(),
            "http://localhost:54321/proj/rest/v1/surveys"
        );
    }

    #[test]
    fn unusable_base_url_is_rejected() {
        assert_matches!(
            RestBackend::with_client(reqwest::Client::new(), "not a url", "k"),
            Err(BackendError::InvalidUrl { .. })
        );
        assert_matches!(
            RestBackend::with_client(reqwest::Client::new(), "mailto:ops@example.co", "k"),
            Err(BackendError::InvalidUrl { .. })
        );
    }

    #[test]
    fn upload_keeps_full_storage_path() {
        let (survey_id, media_id) = (Uuid::new_v4(), Uuid::new_v4());
        let file_name = media_file_name(EvidenceType::Defect, 1, "crack #2?.jpg");
        let path = media_storage_path(survey_id, media_id, &file_name);

        let request = backend()
            .upload_request("survey-media", &path, vec![1, 2, 3], "image/jpeg")
            .build()
            .unwrap();
        let url = request.url();

        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
        assert_eq!(
            url.path(),
            format!(
                "/storage/v1/object/survey-media/checklist/{survey_id}/{media_id}/defect_1_crack%20%232%3F.jpg"
            )
        );
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 8);
    }

    #[test]
    fn public_url_encodes_file_name() {
        let url = backend().public_url("survey-media", "checklist/s/m/defect_1_a b#?.png");
        assert_eq!(
            url,
            "https://proj.example.co/storage/v1/object/public/survey-media/checklist/s/m/defect_1_a%20b%23%3F.png"
        );
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.fragment(), None);
        assert_eq!(parsed.query(), None);
    }

    #[test]
    fn public_url_layout() {
        assert_eq!(
            backend().public_url("survey-media", "checklist/x.jpg"),
            "https://proj.example.co/storage/v1/object/public/survey-media/checklist/x.jpg"
        );
    }

    #[test]
    fn query_params_encode_filters_order_and_limit() {
        let query = Query::new()
            .eq("survey_id", "42")
            .order_by("created_at", Direction::Desc)
            .limit(10);
        let params = query_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("survey_id".to_string(), "eq.42".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_selects_everything() {
        assert_eq!(
            query_params(&Query::new()),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn new_does_not_panic() {
        let backend = RestBackend::new("http://localhost:54321", "key", Duration::from_secs(5));
        assert!(backend.is_ok());
    }
}
