//! Domain entities for one round: the puzzle payload, the fixed step table,
//! and the game phase.

use serde::{Deserialize, Serialize};

/// Bonus for solving at step 1 with no hints of any kind.
pub const SPEED_BONUS: u32 = 50;
/// Default price of one purchased letter reveal.
pub const LETTER_HINT_COST: u32 = 5;
/// Default cap on purchased letter reveals per round.
pub const MAX_LETTER_HINTS: u32 = 3;

/// Immutable puzzle payload for one round, as produced by the generator backend
/// (or the built-in bank).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Puzzle {
  pub category: String,
  /// Canonical solution text.
  pub phrase: String,
  /// `phrase` tokenized into words, order significant.
  pub words: Vec<String>,
  pub emojis: Vec<String>,
  #[serde(default)]
  pub explanation: Option<String>,
}

/// Where the round currently stands. `Completed` and `Abandoned` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
  Playing,
  FinalAnswer,
  Completed,
  Abandoned,
}

impl GamePhase {
  pub fn is_terminal(self) -> bool {
    matches!(self, GamePhase::Completed | GamePhase::Abandoned)
  }
}

/// What a progression step does when it executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
  /// Step 1: nothing revealed yet, full points on the table.
  Start,
  /// One random letter is revealed.
  LetterHint,
  /// One whole word is revealed.
  WordHint,
  /// Everything is revealed; the round is over.
  RevealAnswer,
}

/// One row of the fixed progression table.
#[derive(Clone, Copy, Debug)]
pub struct StepSpec {
  pub step: u8,
  pub name: &'static str,
  pub kind: StepKind,
  pub points: u32,
}

pub const STEP_COUNT: u8 = 8;

/// The fixed 8-step table: point ceiling and hint type per step.
pub const STEP_TABLE: [StepSpec; STEP_COUNT as usize] = [
  StepSpec { step: 1, name: "Start", kind: StepKind::Start, points: 100 },
  StepSpec { step: 2, name: "Letter hint 1", kind: StepKind::LetterHint, points: 90 },
  StepSpec { step: 3, name: "Letter hint 2", kind: StepKind::LetterHint, points: 80 },
  StepSpec { step: 4, name: "Letter hint 3", kind: StepKind::LetterHint, points: 70 },
  StepSpec { step: 5, name: "Word hint 1", kind: StepKind::WordHint, points: 60 },
  StepSpec { step: 6, name: "Word hint 2", kind: StepKind::WordHint, points: 50 },
  StepSpec { step: 7, name: "Word hint 3", kind: StepKind::WordHint, points: 40 },
  StepSpec { step: 8, name: "Reveal answer", kind: StepKind::RevealAnswer, points: 0 },
];

/// Table lookup by 1-based step number. Callers keep steps in `1..=8`.
pub fn step_spec(step: u8) -> &'static StepSpec {
  debug_assert!((1..=STEP_COUNT).contains(&step));
  &STEP_TABLE[(step - 1) as usize]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn step_table_points_strictly_decrease_to_zero() {
    let mut last = u32::MAX;
    for spec in STEP_TABLE.iter() {
      assert!(spec.points < last, "points must strictly decrease");
      last = spec.points;
    }
    assert_eq!(STEP_TABLE[0].points, 100);
    assert_eq!(STEP_TABLE[7].points, 0);
    assert_eq!(STEP_TABLE[7].kind, StepKind::RevealAnswer);
  }

  #[test]
  fn step_spec_is_one_based() {
    assert_eq!(step_spec(1).name, "Start");
    assert_eq!(step_spec(5).kind, StepKind::WordHint);
    assert_eq!(step_spec(8).points, 0);
  }
}
