//! Application-facing layer of shipcheck.
//!
//! - [`state::AppState`]: shared handles to the backend and configuration.
//! - [`services`]: survey persistence façade, media evidence, notes,
//!   checklist and utility services.
//! - [`hooks`]: data-loading handles exposing `{data, loading, error}` with
//!   `refetch`, one per view.
//! - [`insight`]: client for the third-party insight endpoint.
//! - [`telemetry`]: tracing subscriber setup.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod hooks;
pub mod insight;
pub mod services;
pub mod state;
pub mod telemetry;

pub use error::{ClientError, ClientResult};
pub use state::AppState;
