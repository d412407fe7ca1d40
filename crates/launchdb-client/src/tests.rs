//! `LaunchClient` against a stubbed API.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use serde_json::{Value, json};
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{body_json, header, method, path},
};

use crate::{ClientConfig, Error, LaunchClient, RetryPolicy, Sleeper};

/// Records requested delays instead of sleeping.
#[derive(Clone, Default)]
struct RecordingSleeper(Arc<Mutex<Vec<Duration>>>);

impl RecordingSleeper {
  fn delays(&self) -> Vec<Duration> { self.0.lock().unwrap().clone() }
}

impl Sleeper for RecordingSleeper {
  async fn sleep(&self, delay: Duration) { self.0.lock().unwrap().push(delay); }
}

fn client(server: &MockServer) -> (LaunchClient<RecordingSleeper>, RecordingSleeper) {
  let sleeper = RecordingSleeper::default();
  let client = LaunchClient::new(ClientConfig {
    base_url:   server.uri(),
    user_agent: "launchdb-test/0".into(),
    timeout:    Duration::from_secs(5),
    retry:      RetryPolicy::default(),
  })
  .unwrap()
  .with_sleeper(sleeper.clone());
  (client, sleeper)
}

fn page(docs: Value) -> ResponseTemplate {
  ResponseTemplate::new(200).set_body_json(json!({ "docs": docs, "totalDocs": 187 }))
}

fn rate_limited(retry_after: Option<&str>) -> ResponseTemplate {
  let t = ResponseTemplate::new(429);
  match retry_after {
    Some(v) => t.insert_header("Retry-After", v),
    None => t,
  }
}

// ─── Request shape ───────────────────────────────────────────────────────────

#[tokio::test]
async fn sends_paged_sorted_populated_query() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/launches/query"))
    .and(header("accept", "application/json"))
    .and(header("user-agent", "launchdb-test/0"))
    .and(body_json(json!({
      "options": {
        "limit": 3,
        "offset": 6,
        "sort": { "flight_number": "desc" },
        "populate": ["rocket", "launchpad"],
      }
    })))
    .respond_with(page(json!([{ "id": "a" }, { "id": "b" }])))
    .expect(1)
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  let docs = c.fetch_page(3, 6).await.unwrap();
  assert_eq!(docs.len(), 2);
  assert_eq!(docs[0]["id"], "a");
  assert!(sleeper.delays().is_empty());
}

// ─── Retry / backoff ─────────────────────────────────────────────────────────

#[tokio::test]
async fn retries_through_three_rate_limits() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(rate_limited(Some("1")))
    .up_to_n_times(3)
    .expect(3)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .respond_with(page(json!([{ "id": "a" }])))
    .expect(1)
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  let docs = c.fetch_page(1, 0).await.unwrap();
  assert_eq!(docs.len(), 1);

  let delays = sleeper.delays();
  assert_eq!(delays, [1, 2, 4].map(Duration::from_secs));
  assert!(delays.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn missing_retry_after_defaults_to_one_second() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(rate_limited(None))
    .up_to_n_times(2)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .respond_with(page(json!([])))
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  assert!(c.fetch_page(10, 0).await.unwrap().is_empty());
  assert_eq!(sleeper.delays(), [1, 2].map(Duration::from_secs));
}

#[tokio::test]
async fn server_suggested_wait_is_the_base() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(rate_limited(Some("3")))
    .up_to_n_times(2)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .respond_with(page(json!([])))
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  c.fetch_page(10, 0).await.unwrap();
  assert_eq!(sleeper.delays(), [3, 6].map(Duration::from_secs));
}

#[tokio::test]
async fn five_rate_limits_exhaust_the_budget() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(rate_limited(Some("1")))
    .expect(5)
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  let err = c.fetch_page(10, 0).await.unwrap_err();
  assert!(matches!(err, Error::RetrievalExhausted { attempts: 5 }), "got {err:?}");
  assert_eq!(sleeper.delays(), [1, 2, 4, 8].map(Duration::from_secs));
}

// ─── Fatal failures ──────────────────────────────────────────────────────────

#[tokio::test]
async fn server_error_is_not_retried() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
    .expect(1)
    .mount(&server)
    .await;

  let (c, sleeper) = client(&server);
  let err = c.fetch_page(10, 0).await.unwrap_err();
  match err {
    Error::Api { status, message } => {
      assert_eq!(status, 500);
      assert_eq!(message, "boom");
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn body_without_docs_is_a_decode_error() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
    .expect(1)
    .mount(&server)
    .await;

  let (c, _) = client(&server);
  assert!(matches!(c.fetch_page(10, 0).await, Err(Error::Decode(_))));
}
