//! Built-in puzzles so the game is playable with no backend configured.

use crate::domain::Puzzle;

fn puzzle(
  category: &str,
  phrase: &str,
  emojis: &[&str],
  explanation: &str,
) -> Puzzle {
  Puzzle {
    category: category.into(),
    phrase: phrase.into(),
    words: phrase.split_whitespace().map(str::to_string).collect(),
    emojis: emojis.iter().map(|e| e.to_string()).collect(),
    explanation: Some(explanation.into()),
  }
}

/// Small hand-curated bank of emoji phrase puzzles.
pub fn seed_puzzles() -> Vec<Puzzle> {
  vec![
    puzzle(
      "Sayings",
      "time flies",
      &["⏰", "🪰"],
      "A clock for time, a fly for flies.",
    ),
    puzzle(
      "Idioms",
      "piece of cake",
      &["🍰"],
      "Something very easy, like a slice of cake.",
    ),
    puzzle(
      "Idioms",
      "break a leg",
      &["💥", "🦵"],
      "A theatrical way to wish someone good luck.",
    ),
    puzzle(
      "Weather",
      "raining cats and dogs",
      &["🌧️", "🐱", "🐶"],
      "Raining very heavily.",
    ),
    puzzle(
      "Proverbs",
      "the early bird catches the worm",
      &["🌅", "🐦", "🪱"],
      "Acting early brings the reward.",
    ),
    puzzle(
      "Food",
      "cool as a cucumber",
      &["😎", "🥒"],
      "Perfectly calm under pressure.",
    ),
  ]
}

/// Absolute last resort if the bank ever comes back empty.
pub fn hard_fallback_puzzle() -> Puzzle {
  puzzle("Food", "hot dog", &["🔥", "🐶"], "Fire for hot, a dog for dog.")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::guess::normalize;

  #[test]
  fn seed_words_join_back_into_their_phrase() {
    for p in seed_puzzles().into_iter().chain([hard_fallback_puzzle()]) {
      assert!(!p.emojis.is_empty(), "{}: no emojis", p.phrase);
      assert_eq!(normalize(&p.words.join(" ")), normalize(&p.phrase));
    }
  }
}
