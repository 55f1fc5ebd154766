use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Backoff schedule: one attempt per entry in `delays` (waiting that long
/// after a failure), then `final_retries` more attempts spaced by
/// `final_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub delays: Vec<Duration>,
    pub final_retries: usize,
    pub final_delay: Duration,
}

impl Default for RetryPolicy {
    /// 2s, 4s, 6s, 8s, then 10s x 3.
    fn default() -> Self {
        Self {
            delays: [2, 4, 6, 8].map(Duration::from_secs).to_vec(),
            final_retries: 3,
            final_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            delays: Vec::new(),
            final_retries: 1,
            final_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        (self.delays.len() + self.final_retries).max(1)
    }

    fn delay_after(&self, attempt: usize) -> Duration {
        self.delays
            .get(attempt - 1)
            .copied()
            .unwrap_or(self.final_delay)
    }
}

/// Errors that know whether another attempt could help.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Retry an async operation following `policy`. Permanent errors are
/// returned immediately.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + Transient,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts && e.is_transient() => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Request failed (attempt {}/{}): {e}. Retrying after {:.1}s...",
                    attempt,
                    max_attempts,
                    delay.as_secs_f64()
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Failure {
        transient: bool,
    }

    impl Display for Failure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fail (transient={})", self.transient)
        }
    }

    impl Transient for Failure {
        fn is_transient(&self) -> bool {
            self.transient
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            delays: vec![Duration::from_millis(1), Duration::from_millis(2)],
            final_retries: 2,
            final_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), Failure>(())
                }
            },
            &fast_policy(),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_succeeds_after_transient_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(Failure { transient: true })
                    } else {
                        Ok(())
                    }
                }
            },
            &fast_policy(),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_gives_up_after_all_attempts() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), Failure> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(Failure { transient: true })
                }
            },
            &fast_policy(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 4); // 2 base + 2 final
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), Failure> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(Failure { transient: false })
                }
            },
            &fast_policy(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn default_schedule_matches_documented_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 7);
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(4), Duration::from_secs(8));
        assert_eq!(policy.delay_after(5), Duration::from_secs(10));
        assert_eq!(RetryPolicy::none().max_attempts(), 1);
    }
}
