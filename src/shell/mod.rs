//! Terminal front end: command parsing, board rendering, and the event loop.
//! These are thin wrappers that forward to the session; every game decision
//! lives in the core modules.

pub mod render;
pub mod repl;

/// Commands the player can type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  Guess(String),
  Advance,
  LetterHint,
  Skip,
  PauseToggle,
  NewPuzzle,
  Status,
  Help,
  Quit,
}

/// Parse one input line. `None` means empty or unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
  let line = line.trim();
  let (head, rest) = match line.split_once(char::is_whitespace) {
    Some((h, r)) => (h, r.trim()),
    None => (line, ""),
  };
  match head.to_lowercase().as_str() {
    "guess" | "g" => Some(Command::Guess(rest.to_string())),
    "hint" | "advance" | "next" => Some(Command::Advance),
    "letter" | "l" => Some(Command::LetterHint),
    "skip" => Some(Command::Skip),
    "pause" | "resume" => Some(Command::PauseToggle),
    "new" | "n" => Some(Command::NewPuzzle),
    "status" => Some(Command::Status),
    "help" | "?" => Some(Command::Help),
    "quit" | "exit" | "q" => Some(Command::Quit),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guesses_keep_their_raw_text() {
    assert_eq!(
      parse_command("guess Time Flies!"),
      Some(Command::Guess("Time Flies!".into()))
    );
    assert_eq!(parse_command("g hot dog"), Some(Command::Guess("hot dog".into())));
    // An empty guess is still a guess; the session prompts for input.
    assert_eq!(parse_command("guess"), Some(Command::Guess(String::new())));
  }

  #[test]
  fn aliases_map_to_the_same_command() {
    assert_eq!(parse_command("hint"), Some(Command::Advance));
    assert_eq!(parse_command("NEXT"), Some(Command::Advance));
    assert_eq!(parse_command("resume"), Some(Command::PauseToggle));
    assert_eq!(parse_command("q"), Some(Command::Quit));
  }

  #[test]
  fn empty_and_unknown_lines_parse_to_none() {
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("   "), None);
    assert_eq!(parse_command("frobnicate"), None);
  }
}
