use std::sync::Arc;
use std::time::Duration;

use shipcheck_db::{BlobStore, RecordStore};

use crate::config::ClientConfig;
use crate::connectivity::Connectivity;
use crate::error::ClientResult;

/// Shared handles passed to every service and hook.
///
/// Cheap to clone; all fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub config: Arc<ClientConfig>,
    pub connectivity: Connectivity,
}

impl AppState {
    /// Build state backed by the remote REST backend described by `config`.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let backend = shipcheck_db::create_backend(
            &config.backend_url,
            &config.backend_anon_key,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        tracing::info!(url = %config.backend_url, "Backend client created");
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Build state over any backend implementing both stores.
    pub fn with_backend<B>(backend: Arc<B>, config: ClientConfig) -> Self
    where
        B: RecordStore + BlobStore + 'static,
    {
        Self {
            records: backend.clone(),
            blobs: backend,
            config: Arc::new(config),
            connectivity: Connectivity::default(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.config.media_bucket
    }
}
