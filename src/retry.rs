use super::*;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Retry {
  pub(crate) backoff_millis: u64,
  pub(crate) retries: u32,
}

impl Default for Retry {
  fn default() -> Self {
    Self {
      backoff_millis: 250,
      retries: 3,
    }
  }
}

impl Retry {
  fn delay(self, attempt: u32) -> Duration {
    Duration::from_millis(
      self
        .backoff_millis
        .saturating_mul(2u64.saturating_pow(attempt)),
    )
    .min(MAX_BACKOFF)
  }

  /// Runs `operation` until it succeeds, fails with a terminal error, or has
  /// been retried `retries` times.
  pub(crate) async fn run<T, F, Fut>(
    self,
    what: &str,
    operation: F,
  ) -> Result<T>
  where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    let mut attempt = 0;

    loop {
      match operation().await {
        Ok(value) => return Ok(value),
        Err(error) if error.is_transient() && attempt < self.retries => {
          let delay = self.delay(attempt);

          debug!(%error, attempt, ?delay, "retrying {what}");

          time::sleep(delay).await;

          attempt += 1;
        }
        Err(error) => return Err(error),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicU32, Ordering},
  };

  fn transient() -> Error {
    Error::Fetch {
      message: "connection reset".into(),
      status: None,
      url: "https://example.com".into(),
    }
  }

  #[test]
  fn delay_doubles_and_is_capped() {
    let retry = Retry::default();

    assert_eq!(retry.delay(0), Duration::from_millis(250));
    assert_eq!(retry.delay(1), Duration::from_millis(500));
    assert_eq!(retry.delay(2), Duration::from_millis(1000));
    assert_eq!(retry.delay(20), MAX_BACKOFF);
  }

  #[tokio::test(start_paused = true)]
  async fn transient_failures_are_retried_until_success() {
    let calls = &AtomicU32::new(0);

    let value = Retry::default()
      .run("test", || async move {
        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
          Err(transient())
        } else {
          Ok(7)
        }
      })
      .await
      .unwrap();

    assert_eq!(value, 7);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn gives_up_after_configured_retries() {
    let calls = &AtomicU32::new(0);

    let result = Retry::default()
      .run("test", || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(transient())
      })
      .await;

    assert!(matches!(result, Err(Error::Fetch { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
  }

  #[tokio::test(start_paused = true)]
  async fn terminal_errors_are_not_retried() {
    let calls = &AtomicU32::new(0);

    let result = Retry::default()
      .run("test", || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(Error::Fetch {
          message: "forbidden".into(),
          status: Some(403),
          url: "https://example.com".into(),
        })
      })
      .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }
}
