//! Revalidation hook boundary exposed to framework adapters.

use async_trait::async_trait;
use tracing::debug;

use crate::error::RevalidateError;

/// Framework-level cache invalidation.
///
/// Called exactly once per authenticated `metadata_update` webhook, after the
/// client's own cache entry has been cleared. `None` means "invalidate
/// everything".
#[async_trait]
pub trait RevalidateHook: Send + Sync {
    async fn revalidate(&self, path: Option<&str>) -> Result<(), RevalidateError>;
}

/// Hook for frameworks without a page-level cache of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidateHook;

#[async_trait]
impl RevalidateHook for NoopRevalidateHook {
    async fn revalidate(&self, path: Option<&str>) -> Result<(), RevalidateError> {
        debug!(path = ?path, "No framework cache to revalidate");
        Ok(())
    }
}
