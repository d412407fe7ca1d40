//! [`LaunchClient`] — paginated access to the `/launches/query` endpoint.

use std::time::Duration;

use reqwest::{
  Client,
  header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  http::check_response,
  retry::{RetryPolicy, Sleeper, TokioSleeper, saturating_millis},
};

/// Connection settings for the launch API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// API root, e.g. `https://api.spacexdata.com/v4`.
  pub base_url:   String,
  pub user_agent: String,
  pub timeout:    Duration,
  pub retry:      RetryPolicy,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PageRequest {
  options: PageOptions,
}

#[derive(Serialize)]
struct PageOptions {
  limit:    usize,
  offset:   usize,
  sort:     SortSpec,
  /// Expand related documents inline so their names are available.
  populate: [&'static str; 2],
}

#[derive(Serialize)]
struct SortSpec {
  flight_number: &'static str,
}

#[derive(Deserialize)]
struct PageResponse {
  docs: Vec<Value>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// HTTP client for the launch query API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct LaunchClient<S = TokioSleeper> {
  client:  Client,
  config:  ClientConfig,
  sleeper: S,
}

impl LaunchClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
      .user_agent(config.user_agent.clone())
      .default_headers(headers)
      .timeout(config.timeout)
      .build()?;

    Ok(Self { client, config, sleeper: TokioSleeper })
  }
}

impl<S: Sleeper> LaunchClient<S> {
  /// Replace the backoff sleeper.
  pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> LaunchClient<T> {
    LaunchClient {
      client: self.client,
      config: self.config,
      sleeper,
    }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `POST /launches/query` — up to `limit` launches starting at `offset`,
  /// newest flight number first, with rocket and launchpad populated.
  ///
  /// A 429 response is retried after `wait * 2^attempt`, where `wait` is the
  /// `Retry-After` value or the policy default. Any other failure is returned
  /// at once. When every attempt is rate limited the call fails with
  /// [`Error::RetrievalExhausted`].
  pub async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Value>> {
    let body = PageRequest {
      options: PageOptions {
        limit,
        offset,
        sort: SortSpec { flight_number: "desc" },
        populate: ["rocket", "launchpad"],
      },
    };
    let policy = self.config.retry;

    for attempt in 0..policy.max_attempts {
      match self.send_once(&body).await {
        Err(Error::RateLimited { retry_after_secs }) => {
          // No sleep after the final attempt; nothing follows it.
          if attempt + 1 == policy.max_attempts {
            break;
          }
          let delay = policy.delay(retry_after_secs, attempt);
          tracing::warn!(
            attempt = attempt + 1,
            max_attempts = policy.max_attempts,
            delay_ms = saturating_millis(delay),
            "rate limited, backing off"
          );
          self.sleeper.sleep(delay).await;
        }
        other => return other,
      }
    }

    Err(Error::RetrievalExhausted { attempts: policy.max_attempts })
  }

  async fn send_once(&self, body: &PageRequest) -> Result<Vec<Value>> {
    let url = self.url("/launches/query");
    tracing::debug!(%url, limit = body.options.limit, offset = body.options.offset, "requesting page");

    let resp = self.client.post(&url).json(body).send().await?;
    let resp = check_response(resp).await?;
    let bytes = resp.bytes().await?;
    let page: PageResponse = serde_json::from_slice(&bytes)?;

    tracing::debug!(docs = page.docs.len(), "received page");
    Ok(page.docs)
  }
}
