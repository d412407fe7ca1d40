//! Orchestration for launchdb: wires the API client, record normalisation,
//! the SQLite store and the on-disk JSON artifacts into the `fetch` and
//! `query` commands.

pub mod artifacts;
pub mod error;
pub mod pipeline;
pub mod settings;

pub use error::{Error, Result};
pub use pipeline::{FetchReport, Pipeline, QueryOutput};
pub use settings::Settings;
