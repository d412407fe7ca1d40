//! Core types and trait definitions for launchdb.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The client, store and CLI crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod filter;
pub mod launch;
pub mod store;

pub use error::{Error, Result};
