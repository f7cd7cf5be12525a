//! Backend store abstraction.
//!
//! [`RecordStore`] covers the table API (insert / update / select / delete
//! with equality filters and ordering). [`BlobStore`] covers object storage.
//! Rows cross this boundary as untyped JSON; the models module owns the
//! typed schema for each table.

use async_trait::async_trait;
use serde_json::Value;

pub mod memory;
pub mod rest;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from either store.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A row did not match the expected schema.
    #[error("Failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),

    /// A write that should return the stored row returned nothing.
    #[error("Backend returned no rows for {table}")]
    EmptyResponse { table: String },

    /// An inserted row came back without a usable identifier.
    #[error("Backend did not assign an id for {table}")]
    MissingId { table: String },

    /// The configured project URL cannot carry request paths.
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The backend refused or could not serve the call.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A read against one table: equality filters, optional ordering and limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Table storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one row and return it as stored (with backend-assigned columns).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError>;

    /// Overwrite the given columns on every row matching `filters`.
    /// Returns the updated rows.
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Value,
    ) -> Result<Vec<Value>, BackendError>;

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError>;

    /// Delete every row matching `filters`, returning how many were removed.
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<u64, BackendError>;
}

/// Object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError>;

    /// Publicly reachable URL for an object. Does not check existence.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
