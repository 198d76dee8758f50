pub mod account_service;
pub mod message_service;

pub use account_service::AccountService;
pub use message_service::MessageService;

use anyhow::anyhow;
use tracing::error;

use crate::error::ApiError;

/// Run a blocking service call off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow!("blocking task failed: {}", e))
    })?
}
