//! Guess normalization and comparison. The verdict is phase-blind; the session
//! decides what a wrong answer means in each phase.

/// Punctuation stripped before comparison.
const STRIP: &str = ".,/#!$%^&*;:{}=-_`~()?'";

/// Trim, lowercase, drop the fixed punctuation set, and collapse internal
/// whitespace runs to a single space.
pub fn normalize(text: &str) -> String {
  let lowered = text.to_lowercase();
  let mut out = String::with_capacity(lowered.len());
  let mut pending_space = false;
  for ch in lowered.trim().chars() {
    if STRIP.contains(ch) {
      continue;
    }
    if ch.is_whitespace() {
      pending_space = true;
      continue;
    }
    if pending_space && !out.is_empty() {
      out.push(' ');
    }
    pending_space = false;
    out.push(ch);
  }
  out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
  /// Nothing left after normalization; prompt the player, change nothing.
  Empty,
  Correct,
  Incorrect,
}

pub fn evaluate(raw_guess: &str, solution_phrase: &str) -> Verdict {
  let guess = normalize(raw_guess);
  if guess.is_empty() {
    return Verdict::Empty;
  }
  if guess == normalize(solution_phrase) {
    Verdict::Correct
  } else {
    Verdict::Incorrect
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_ignores_case_punctuation_and_spacing() {
    assert_eq!(normalize("The Quick Fox!!"), normalize("the quick fox"));
    assert_eq!(normalize("  time   flies  "), "time flies");
    assert_eq!(normalize("don't panic?"), "dont panic");
    assert_eq!(normalize("a - b"), "a b");
  }

  #[test]
  fn empty_and_punctuation_only_guesses_are_empty() {
    assert_eq!(evaluate("", "time flies"), Verdict::Empty);
    assert_eq!(evaluate("  ?!.  ", "time flies"), Verdict::Empty);
  }

  #[test]
  fn verdicts_match_the_solution_after_normalization() {
    assert_eq!(evaluate("Time Flies", "time flies"), Verdict::Correct);
    assert_eq!(evaluate("time  flies!", "Time flies"), Verdict::Correct);
    assert_eq!(evaluate("time flees", "time flies"), Verdict::Incorrect);
  }
}
