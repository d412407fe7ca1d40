//! `launchdb` — fetch, cache and query launch records.
//!
//! # Usage
//!
//! ```
//! launchdb fetch --count 50
//! launchdb query --filter success:true,rocket:Falcon\ 9 --limit 5
//! launchdb --config ./launchdb.toml query
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default); query results
//! go to stdout.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use launchdb_cli::{Pipeline, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Fetch, cache and query launch records")]
struct Cli {
  /// Path to a TOML configuration file (defaults to ./launchdb.toml if present).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Fetch one page of launches, cache the raw JSON and store normalised rows.
  Fetch {
    /// Number of launches to request.
    #[arg(long, visible_alias = "param", default_value_t = 50)]
    count:  usize,

    /// Number of launches to skip, newest first.
    #[arg(long, default_value_t = 0)]
    offset: usize,
  },

  /// Query stored launches and print them as JSON.
  Query {
    /// Comma-separated `key:value` equality filters, e.g. `success:true`.
    #[arg(long, default_value = "")]
    filter: String,

    /// Maximum number of results.
    #[arg(long, default_value_t = 5)]
    limit:  usize,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
  let pipeline = Pipeline::init(settings)
    .await
    .context("failed to initialise")?;

  match cli.command {
    Command::Fetch { count, offset } => {
      let report = pipeline
        .run_fetch(count, offset)
        .await
        .context("fetch failed")?;
      println!("Fetched and saved {} launches.", report.processed);
    }
    Command::Query { filter, limit } => {
      let output = pipeline
        .run_query(&filter, limit)
        .await
        .context("query failed")?;
      println!("{}", output.json);
    }
  }

  Ok(())
}
