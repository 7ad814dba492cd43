use std::future::Future;

use tokio_util::sync::CancellationToken;

use confcat_core::error::{ConfcatError, Result};

/// Runs `fut` unless `token` fires first.
///
/// The store call is dropped as soon as the token is cancelled.
pub(crate) async fn run_cancellable<T, F>(
    token: Option<&CancellationToken>,
    operation: &str,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let Some(token) = token else {
        return fut.await;
    };

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ConfcatError::cancelled(format!("{} was cancelled", operation))),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<u32> =
            run_cancellable(Some(&token), "query", std::future::pending()).await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_without_token_runs_to_completion() {
        let result = run_cancellable(None, "query", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
