//! Guessmoji · emoji phrase guessing client
//!
//! - Step-based hint/reveal state machine with scoring and a final-answer
//!   countdown
//! - Puzzle backend over HTTP, or the built-in puzzle bank when none is set
//! - Interactive terminal shell
//!
//! Important env variables:
//!   GUESSMOJI_API_BASE_URL : puzzle backend, e.g. "http://localhost:5006"
//!   GUESSMOJI_CONFIG_PATH  : path to TOML config (timers, hint costs)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod api;
mod config;
mod domain;
mod guess;
mod protocol;
mod reveal;
mod scoring;
mod seeds;
mod session;
mod shell;
mod telemetry;
mod timer;

use tracing::{info, instrument};

use crate::api::PuzzleSource;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = config::load_from_env();
  let source = PuzzleSource::from_config(&cfg)?;
  match &source {
    PuzzleSource::Backend(_) => {
      info!(target: "guessmoji", base_url = ?cfg.api_base_url, "Using puzzle backend");
    }
    PuzzleSource::Builtin => {
      info!(target: "guessmoji", "No backend configured; playing from the built-in bank");
    }
  }

  shell::repl::run(cfg, source).await
}
