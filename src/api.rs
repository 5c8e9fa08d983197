//! HTTP client for the puzzle backend, plus the built-in offline source.
//!
//! Calls are instrumented and log status codes and sizes, never full payloads.
//! The result log is fire-and-forget: failures are recorded and swallowed so
//! they can never interrupt gameplay.

use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::GameConfig;
use crate::domain::Puzzle;
use crate::protocol::{ErrorBody, PuzzleIn, RoundReport};
use crate::seeds;

const USER_AGENT_VALUE: &str = "guessmoji/0.1";

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("backend returned HTTP {status}: {message}")]
  Status { status: u16, message: String },
  #[error("invalid puzzle data: {0}")]
  InvalidPuzzle(String),
}

/// Client for the two backend endpoints.
#[derive(Clone)]
pub struct Backend {
  client: reqwest::Client,
  base_url: String,
}

impl Backend {
  pub fn new(base_url: &str) -> Result<Self, ApiError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }

  #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
  pub async fn fetch_puzzle(&self) -> Result<Puzzle, ApiError> {
    let url = format!("{}/api/generate-puzzle", self.base_url);
    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or(body);
      return Err(ApiError::Status { status, message });
    }

    let raw: PuzzleIn = res.json().await?;
    let puzzle = raw.into_puzzle().map_err(ApiError::InvalidPuzzle)?;
    info!(
      target: "backend",
      category = %puzzle.category,
      words = puzzle.words.len(),
      emojis = puzzle.emojis.len(),
      "Puzzle received"
    );
    Ok(puzzle)
  }

  /// Post the round summary. Never retried, never surfaced to the player.
  #[instrument(level = "info", skip(self, report), fields(solved = %report.solved_correctly, score = report.puzzle_score))]
  pub async fn log_result(&self, report: &RoundReport) {
    let url = format!("{}/api/log-puzzle-result", self.base_url);
    let sent = self
      .client
      .post(&url)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .header(CONTENT_TYPE, "application/json")
      .json(report)
      .send()
      .await;
    match sent {
      Ok(res) if res.status().is_success() => {
        info!(target: "backend", "Round result logged");
      }
      Ok(res) => {
        error!(target: "backend", status = %res.status(), "Result log rejected; dropping");
      }
      Err(e) => {
        error!(target: "backend", error = %e, "Result log failed; dropping");
      }
    }
  }
}

/// Where puzzles come from: the configured backend, or the built-in bank.
#[derive(Clone)]
pub enum PuzzleSource {
  Backend(Backend),
  Builtin,
}

impl PuzzleSource {
  pub fn from_config(cfg: &GameConfig) -> Result<Self, ApiError> {
    match &cfg.api_base_url {
      Some(url) => Ok(PuzzleSource::Backend(Backend::new(url)?)),
      None => Ok(PuzzleSource::Builtin),
    }
  }

  pub async fn next_puzzle(&self) -> Result<Puzzle, ApiError> {
    match self {
      PuzzleSource::Backend(b) => b.fetch_puzzle().await,
      PuzzleSource::Builtin => {
        let puzzle = seeds::seed_puzzles()
          .choose(&mut rand::thread_rng())
          .cloned()
          .unwrap_or_else(seeds::hard_fallback_puzzle);
        info!(target: "backend", category = %puzzle.category, "Serving built-in puzzle");
        Ok(puzzle)
      }
    }
  }

  pub async fn log_result(&self, report: &RoundReport) {
    match self {
      PuzzleSource::Backend(b) => b.log_result(report).await,
      PuzzleSource::Builtin => {
        info!(
          target: "backend",
          solved = %report.solved_correctly,
          total = report.total_score_at_end,
          "Offline: round result not sent"
        );
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_url_trailing_slash_is_trimmed() {
    let b = Backend::new("http://localhost:5006/").expect("client");
    assert_eq!(b.base_url, "http://localhost:5006");
  }

  #[tokio::test]
  async fn builtin_source_always_produces_a_valid_puzzle() {
    let source = PuzzleSource::Builtin;
    for _ in 0..10 {
      let p = source.next_puzzle().await.expect("puzzle");
      assert!(!p.phrase.is_empty());
      assert!(!p.words.is_empty());
      assert!(!p.emojis.is_empty());
    }
  }
}
