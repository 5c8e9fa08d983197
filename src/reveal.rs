//! Reveal bookkeeping for one puzzle: which words and which individual letters
//! are visible. Pure data plus query functions; rendering lives in the shell.
//!
//! Reveals are one-way. Nothing here ever hides a word or letter again, and
//! repeating a reveal is a harmless no-op.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
  #[error("no unrevealed letter positions remain")]
  NoAvailablePositions,
}

#[derive(Clone, Debug)]
pub struct RevealState {
  /// Letter count per word, fixed at construction.
  word_lens: Vec<usize>,
  revealed_words: BTreeSet<usize>,
  /// `(word_index, letter_index)` pairs revealed individually. Pairs inside a
  /// fully revealed word are redundant but harmless; new letter reveals skip
  /// such words entirely.
  revealed_letters: BTreeSet<(usize, usize)>,
}

impl RevealState {
  pub fn new(words: &[String]) -> Self {
    Self {
      word_lens: words.iter().map(|w| w.chars().count()).collect(),
      revealed_words: BTreeSet::new(),
      revealed_letters: BTreeSet::new(),
    }
  }

  /// Reveal a whole word. Out-of-range or already-revealed indices are no-ops.
  pub fn reveal_word(&mut self, index: usize) {
    if index < self.word_lens.len() {
      self.revealed_words.insert(index);
    }
  }

  /// Reveal every word at once (round end).
  pub fn reveal_all(&mut self) {
    for i in 0..self.word_lens.len() {
      self.revealed_words.insert(i);
    }
  }

  /// Pick one uniformly random unrevealed letter position, skipping words that
  /// are already fully revealed, and mark it revealed.
  pub fn reveal_random_letter<R: Rng + ?Sized>(
    &mut self,
    rng: &mut R,
  ) -> Result<(usize, usize), RevealError> {
    let candidates: Vec<(usize, usize)> = self
      .word_lens
      .iter()
      .enumerate()
      .filter(|(w, _)| !self.revealed_words.contains(w))
      .flat_map(|(w, &len)| (0..len).map(move |l| (w, l)))
      .filter(|pos| !self.revealed_letters.contains(pos))
      .collect();

    let pos = *candidates
      .choose(rng)
      .ok_or(RevealError::NoAvailablePositions)?;
    self.revealed_letters.insert(pos);
    Ok(pos)
  }

  pub fn is_word_revealed(&self, index: usize) -> bool {
    self.revealed_words.contains(&index)
  }

  pub fn is_letter_revealed(&self, word: usize, letter: usize) -> bool {
    self.revealed_words.contains(&word) || self.revealed_letters.contains(&(word, letter))
  }

  pub fn all_words_revealed(&self) -> bool {
    self.revealed_words.len() == self.word_lens.len()
  }

  pub fn unrevealed_word_count(&self) -> usize {
    self.word_lens.len() - self.revealed_words.len()
  }

  /// Lowest-indexed word that is still hidden, if any.
  pub fn first_unrevealed_word(&self) -> Option<usize> {
    (0..self.word_lens.len()).find(|i| !self.revealed_words.contains(i))
  }

  /// Words revealed whole plus letters revealed individually. Used for the
  /// "no hints of any kind" speed-bonus check.
  pub fn reveal_count(&self) -> usize {
    self.revealed_words.len() + self.revealed_letters.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn reveal_word_is_idempotent_and_bounded() {
    let mut rs = RevealState::new(&words(&["time", "flies"]));
    rs.reveal_word(0);
    rs.reveal_word(0);
    rs.reveal_word(99);
    assert_eq!(rs.unrevealed_word_count(), 1);
    assert!(rs.is_word_revealed(0));
    assert!(!rs.is_word_revealed(1));
    assert_eq!(rs.first_unrevealed_word(), Some(1));
  }

  #[test]
  fn random_letter_skips_fully_revealed_words() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut rs = RevealState::new(&words(&["ab", "cd"]));
    rs.reveal_word(0);
    for _ in 0..2 {
      let (w, l) = rs.reveal_random_letter(&mut rng).expect("position");
      assert_eq!(w, 1);
      assert!(l < 2);
    }
    assert_eq!(
      rs.reveal_random_letter(&mut rng),
      Err(RevealError::NoAvailablePositions)
    );
  }

  #[test]
  fn random_letter_never_repeats_a_position() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut rs = RevealState::new(&words(&["abc", "de"]));
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..5 {
      let pos = rs.reveal_random_letter(&mut rng).expect("position");
      assert!(seen.insert(pos), "position {pos:?} repeated");
    }
    assert_eq!(
      rs.reveal_random_letter(&mut rng),
      Err(RevealError::NoAvailablePositions)
    );
  }

  #[test]
  fn reveal_all_finishes_the_board() {
    let mut rs = RevealState::new(&words(&["a", "b", "c"]));
    assert!(!rs.all_words_revealed());
    rs.reveal_all();
    assert!(rs.all_words_revealed());
    assert_eq!(rs.unrevealed_word_count(), 0);
    assert_eq!(rs.first_unrevealed_word(), None);
  }

  #[test]
  fn letters_in_revealed_words_read_as_revealed() {
    let mut rs = RevealState::new(&words(&["hi"]));
    rs.reveal_word(0);
    assert!(rs.is_letter_revealed(0, 0));
    assert!(rs.is_letter_revealed(0, 1));
  }
}
