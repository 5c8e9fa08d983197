//! Loading client configuration from TOML (path via GUESSMOJI_CONFIG_PATH).
//!
//! Every field has a default, so the game runs with no config file at all.
//! GUESSMOJI_API_BASE_URL overrides the TOML value; with no base URL the
//! client plays from the built-in puzzle bank.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{LETTER_HINT_COST, MAX_LETTER_HINTS};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  /// Base URL of the puzzle backend, e.g. "http://localhost:5006".
  pub api_base_url: Option<String>,
  /// Seconds between automatic step advances (auto-advance mode only).
  pub auto_hint_interval_secs: u32,
  /// Length of the final-answer countdown.
  pub final_answer_secs: u32,
  pub letter_hint_cost: u32,
  pub max_letter_hints: u32,
  /// When true, the auto-hint timer drives step advances on a schedule.
  /// Off by default: progression is manual.
  pub auto_advance: bool,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      api_base_url: None,
      auto_hint_interval_secs: 15,
      final_answer_secs: 10,
      letter_hint_cost: LETTER_HINT_COST,
      max_letter_hints: MAX_LETTER_HINTS,
      auto_advance: false,
    }
  }
}

/// Attempt to load `GameConfig` from GUESSMOJI_CONFIG_PATH, then apply env
/// overrides. Any parsing/IO error falls back to defaults.
pub fn load_from_env() -> GameConfig {
  let mut cfg = match std::env::var("GUESSMOJI_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<GameConfig>(&s) {
        Ok(cfg) => {
          info!(target: "guessmoji", %path, "Loaded game config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "guessmoji", %path, error = %e, "Failed to parse TOML config; using defaults");
          GameConfig::default()
        }
      },
      Err(e) => {
        error!(target: "guessmoji", %path, error = %e, "Failed to read TOML config file; using defaults");
        GameConfig::default()
      }
    },
    Err(_) => GameConfig::default(),
  };

  if let Ok(url) = std::env::var("GUESSMOJI_API_BASE_URL") {
    if !url.trim().is_empty() {
      cfg.api_base_url = Some(url);
    }
  }
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_game_rules() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.auto_hint_interval_secs, 15);
    assert_eq!(cfg.final_answer_secs, 10);
    assert_eq!(cfg.letter_hint_cost, 5);
    assert_eq!(cfg.max_letter_hints, 3);
    assert!(!cfg.auto_advance);
    assert!(cfg.api_base_url.is_none());
  }

  #[test]
  fn partial_toml_keeps_defaults_for_missing_fields() {
    let cfg: GameConfig =
      toml::from_str("api_base_url = \"http://localhost:5006\"\nauto_advance = true")
        .expect("parse");
    assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:5006"));
    assert!(cfg.auto_advance);
    assert_eq!(cfg.final_answer_secs, 10);
  }
}
