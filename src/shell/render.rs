//! Plain-text rendering of the board. Pure string builders plus one printer;
//! nothing in here touches game state.

use crate::domain::{GamePhase, Puzzle};
use crate::reveal::RevealState;
use crate::session::GameSession;

#[derive(Clone, Copy, Debug)]
pub enum MsgKind {
  Info,
  Success,
  Error,
}

pub fn say(kind: MsgKind, text: &str) {
  let prefix = match kind {
    MsgKind::Info => "·",
    MsgKind::Success => "✔",
    MsgKind::Error => "✘",
  };
  println!("{prefix} {text}");
}

pub fn header_line(puzzle: &Puzzle) -> String {
  format!("{}   [{}]", puzzle.emojis.join(" "), puzzle.category)
}

/// Hidden letters render as underscores in place: "time flies" with the first
/// word revealed and letter (1, 0) revealed reads "time f____".
pub fn phrase_line(puzzle: &Puzzle, reveal: &RevealState) -> String {
  puzzle
    .words
    .iter()
    .enumerate()
    .map(|(w, word)| {
      if reveal.is_word_revealed(w) {
        word.clone()
      } else {
        word
          .chars()
          .enumerate()
          .map(|(l, ch)| if reveal.is_letter_revealed(w, l) { ch } else { '_' })
          .collect()
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn status_line(session: &GameSession) -> String {
  let score = &session.score;
  match session.phase() {
    GamePhase::Playing => {
      let next = match session.next_step_name() {
        Some(name) => format!("next: {name}"),
        None => "last step".into(),
      };
      format!(
        "step {}/8 ({}) · {} pts on the table · {} · total {}",
        session.current_step(),
        session.step_name(),
        session.max_available_points(),
        next,
        score.total_score,
      )
    }
    GamePhase::FinalAnswer => format!(
      "FINAL ANSWER · {} pts on the table · {}s left · total {}",
      session.max_available_points(),
      session.timers.final_answer_remaining,
      score.total_score,
    ),
    GamePhase::Completed | GamePhase::Abandoned => {
      format!("round over · total {}", score.total_score)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn puzzle() -> Puzzle {
    Puzzle {
      category: "Sayings".into(),
      phrase: "time flies".into(),
      words: vec!["time".into(), "flies".into()],
      emojis: vec!["⏰".into(), "🪰".into()],
      explanation: None,
    }
  }

  #[test]
  fn blanks_track_reveals_letter_by_letter() {
    let p = puzzle();
    let mut reveal = RevealState::new(&p.words);
    assert_eq!(phrase_line(&p, &reveal), "____ _____");

    reveal.reveal_word(0);
    assert_eq!(phrase_line(&p, &reveal), "time _____");

    reveal.reveal_all();
    assert_eq!(phrase_line(&p, &reveal), "time flies");
  }

  #[test]
  fn header_shows_emojis_and_category() {
    assert_eq!(header_line(&puzzle()), "⏰ 🪰   [Sayings]");
  }
}
