//! Single retry for transient store failures.

use std::future::Future;

use crate::domain::foundation::DomainError;

/// Runs `op`, retrying it once if the first attempt failed with a transient
/// store error. Any other outcome is returned unchanged.
///
/// Only use for reads and idempotent writes.
pub async fn retry_transient<T, F, Fut>(operation: &'static str, mut op: F) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    match op().await {
        Err(err) if err.is_transient() => {
            tracing::warn!(operation, error = %err, "Transient store failure, retrying once");
            op().await
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn transient_failure_is_retried_once() {
        let calls = AtomicUsize::new(0);
        let result = retry_transient("read", || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DomainError::database("connection reset"))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn persistent_failure_surfaces_after_second_attempt() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_transient("read", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::database("down"))
        })
        .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::DatabaseError);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_transient_errors_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_transient("update", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::new(ErrorCode::ConcurrencyConflict, "stale"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
