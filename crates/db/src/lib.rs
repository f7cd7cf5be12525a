//! Persistence layer for shipcheck.
//!
//! All data lives in a hosted backend: a table API for rows and an object
//! API for binary attachments. This crate defines the two store traits,
//! their REST and in-memory implementations, the per-entity row schemas,
//! and one repository per table.

use std::time::Duration;

pub mod backend;
pub mod models;
pub mod repositories;

pub use backend::memory::MemoryBackend;
pub use backend::rest::RestBackend;
pub use backend::{BackendError, BlobStore, Direction, Filter, Query, RecordStore};

/// Build a REST backend handle for the given project URL and API key.
pub fn create_backend(
    base_url: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<RestBackend, BackendError> {
    RestBackend::new(base_url, api_key, timeout)
}

/// Verify that the table API is reachable by reading at most one survey.
pub async fn health_check(store: &dyn RecordStore) -> Result<(), BackendError> {
    store
        .select(
            repositories::survey_repo::TABLE,
            &Query::new().limit(1),
        )
        .await?;
    Ok(())
}
