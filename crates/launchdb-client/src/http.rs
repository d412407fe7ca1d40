//! Response status handling shared by every request.

use crate::error::Error;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. A 429 becomes
/// [`Error::RateLimited`] carrying the `Retry-After` seconds, if present and
/// numeric; any other non-success status becomes [`Error::Api`] with the
/// response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
  let status = resp.status();
  if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
    return Err(Error::RateLimited {
      retry_after_secs: parse_retry_after(&resp),
    });
  }
  if !status.is_success() {
    return Err(Error::Api {
      status:  status.as_u16(),
      message: resp.text().await.unwrap_or_default(),
    });
  }
  Ok(resp)
}

/// Parse the `Retry-After` header as whole seconds.
fn parse_retry_after(resp: &reqwest::Response) -> Option<u64> {
  resp
    .headers()
    .get(reqwest::header::RETRY_AFTER)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.trim().parse::<u64>().ok())
}
