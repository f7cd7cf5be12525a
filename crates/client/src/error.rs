use shipcheck_core::error::CoreError;
use shipcheck_db::BackendError;

use crate::config::ConfigError;
use crate::insight::InsightError;

/// Errors surfaced by client services.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Cannot {0} while offline")]
    Offline(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Message suitable for a notification shown to the user.
    ///
    /// Internal failures are logged here and replaced with a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Core(CoreError::NotFound { entity, .. }) => format!("{entity} not found"),
            ClientError::Core(CoreError::Validation(msg)) => msg.clone(),
            ClientError::Offline(action) => format!("You are offline. Reconnect to {action}."),
            ClientError::Backend(BackendError::Request(_)) => {
                "Network error. Check your connection and try again.".to_string()
            }
            ClientError::Backend(BackendError::Api { status, .. })
                if *status == 401 || *status == 403 =>
            {
                "You are not allowed to do that".to_string()
            }
            ClientError::Insight(InsightError::NotConfigured) => {
                "Insights are not configured".to_string()
            }
            other => {
                tracing::error!(error = %other, "Internal client error");
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
