//! Backoff policy for rate-limited requests.

use std::{future::Future, time::Duration};

/// Bounds on the rate-limit retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Total attempts, including the first request.
  pub max_attempts: u32,
  /// Base wait used when a 429 carries no usable `Retry-After`.
  pub default_wait: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 5,
      default_wait: Duration::from_secs(1),
    }
  }
}

impl RetryPolicy {
  /// Delay before the retry that follows zero-based `attempt`:
  /// `wait * 2^attempt`, saturating.
  pub fn delay(&self, retry_after_secs: Option<u64>, attempt: u32) -> Duration {
    let wait = retry_after_secs.map_or(self.default_wait, Duration::from_secs);
    wait.saturating_mul(2u32.saturating_pow(attempt))
  }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn saturating_millis(d: Duration) -> u64 {
  u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Suspends the retry loop between attempts.
pub trait Sleeper: Send + Sync {
  fn sleep(&self, delay: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
  async fn sleep(&self, delay: Duration) { tokio::time::sleep(delay).await }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delay_doubles_per_attempt() {
    let p = RetryPolicy::default();
    let delays: Vec<_> = (0..4).map(|a| p.delay(Some(2), a)).collect();
    assert_eq!(
      delays,
      [2, 4, 8, 16].map(Duration::from_secs)
    );
  }

  #[test]
  fn missing_retry_after_uses_default_wait() {
    let p = RetryPolicy {
      max_attempts: 5,
      default_wait: Duration::from_millis(250),
    };
    assert_eq!(p.delay(None, 0), Duration::from_millis(250));
    assert_eq!(p.delay(None, 2), Duration::from_secs(1));
  }

  #[test]
  fn zero_retry_after_means_no_wait() {
    assert_eq!(RetryPolicy::default().delay(Some(0), 3), Duration::ZERO);
  }

  #[test]
  fn millis_saturate_instead_of_wrapping() {
    assert_eq!(saturating_millis(Duration::from_millis(1500)), 1500);
    assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
  }

  #[test]
  fn huge_attempt_saturates() {
    assert_eq!(RetryPolicy::default().delay(Some(u64::MAX), 40), Duration::MAX);
  }
}
