//! HTTP client for the launch query API.
//!
//! One call to [`LaunchClient::fetch_page`] issues one page request. Rate
//! limited responses are retried with exponential backoff; every other failure
//! is returned immediately.

mod client;
mod http;
mod retry;

pub mod error;

pub use client::{ClientConfig, LaunchClient};
pub use error::{Error, Result};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};

#[cfg(test)]
mod tests;
