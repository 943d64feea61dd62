//! Storage liveness probe.

use crate::error::AppError;
use async_trait::async_trait;

/// Reports whether the backing store answers requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Issues the cheapest possible round-trip to the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Human-readable backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
