//! 通用指数退避重试
//!
//! 对「瞬时过载」类错误做有限次数的指数退避重试，而不是在每个调用点
//! 重新手写重试循环。调用方通过 `is_retryable` 判定错误是否值得重试。
//!
//! 状态机：
//! `Attempting → (成功: Done) | (瞬时失败且有余额: Backoff → Attempting)
//!             | (瞬时失败且余额耗尽: Degraded) | (非瞬时失败: Failed)`

use std::future::Future;
use std::time::Duration;

/// Outcome of a retried operation that did not hard-fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome<T> {
    /// The operation eventually succeeded.
    Success(T),
    /// Every attempt failed with a retryable error; the caller should degrade
    /// gracefully (e.g. substitute a canned response).
    Exhausted,
}

/// Run `op` up to `max_attempts` times, sleeping with exponentially doubling
/// delays (starting at `base_delay`) between attempts that fail with a
/// retryable error.
///
/// - retryable error, attempts remain → back off and retry
/// - retryable error, budget exhausted → `Ok(RetryOutcome::Exhausted)`
/// - non-retryable error → `Err(e)` immediately, no further attempts
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    max_attempts: u32,
    base_delay: Duration,
    is_retryable: P,
    mut op: F,
) -> Result<RetryOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut delay = base_delay;
    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(RetryOutcome::Success(value)),
            Err(e) if is_retryable(&e) => {
                if attempt == max_attempts {
                    tracing::warn!(attempt, "Transient failure, retry budget exhausted");
                    return Ok(RetryOutcome::Exhausted);
                }
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Transient failure, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
    // max_attempts == 0
    Ok(RetryOutcome::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Overloaded,
        Fatal,
    }

    fn retryable(e: &TestError) -> bool {
        matches!(e, TestError::Overloaded)
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_with_doubling_delays() {
        let attempts = AtomicU32::new(0);
        let mut call_times = Vec::new();

        let result = retry_with_backoff(
            3,
            Duration::from_millis(100),
            retryable,
            || {
                call_times.push(Instant::now());
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(TestError::Overloaded)
                    } else {
                        Ok("recommendation")
                    }
                }
            },
        )
        .await;

        assert_eq!(result, Ok(RetryOutcome::Success("recommendation")));
        assert_eq!(call_times.len(), 3);
        // Gap between attempt 1→2 is the base delay, 2→3 is doubled.
        let first_gap = call_times[1] - call_times[0];
        let second_gap = call_times[2] - call_times[1];
        assert_eq!(first_gap, Duration::from_millis(100));
        assert_eq!(second_gap, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_budget_on_persistent_overload() {
        let attempts = AtomicU32::new(0);

        let result = retry_with_backoff(3, Duration::from_millis(50), retryable, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(TestError::Overloaded) }
        })
        .await;

        assert_eq!(result, Ok(RetryOutcome::Exhausted));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_fails_immediately() {
        let attempts = AtomicU32::new(0);

        let result = retry_with_backoff(3, Duration::from_millis(50), retryable, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(TestError::Fatal) }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
