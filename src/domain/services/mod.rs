pub mod blocked;
pub mod capacity;
pub mod hours;
pub mod planner;
pub mod selection;
pub mod slots;

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Runs a leaf-store fetch, retrying once after a short backoff. The caller
/// decides what safe default to substitute when both attempts fail; the
/// generation pass itself must never abort on a fetch error.
pub(crate) async fn fetch_with_retry<T, F, Fut>(what: &str, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    match op().await {
        Ok(v) => Ok(v),
        Err(first) => {
            warn!("{} fetch failed, retrying: {}", what, first);
            tokio::time::sleep(RETRY_DELAY).await;
            op().await
        }
    }
}
