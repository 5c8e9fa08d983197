//! The interactive loop. Stdin commands, timer ticks, and fetch results are
//! funneled into one queue and applied to the session in arrival order, so
//! every mutation runs to completion before the next event is looked at.

use std::error::Error;

use rand::thread_rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{ApiError, PuzzleSource};
use crate::config::GameConfig;
use crate::domain::{GamePhase, Puzzle};
use crate::protocol::RoundReport;
use crate::session::{GameSession, LossKind, Transition};
use crate::timer::{Tick, TimerController, TimerKind, TimerTick};

use super::render::{self, MsgKind};
use super::{parse_command, Command};

/// Result of one puzzle fetch, tagged so a stale response can never overwrite
/// a newer round.
struct FetchOutcome {
  fetch: Uuid,
  result: Result<Puzzle, ApiError>,
}

struct Repl {
  cfg: GameConfig,
  source: PuzzleSource,
  session: Option<GameSession>,
  timers: TimerController,
  fetch_tx: UnboundedSender<FetchOutcome>,
  /// The one fetch whose result we will accept.
  pending_fetch: Option<Uuid>,
  carried_total: u32,
}

pub async fn run(cfg: GameConfig, source: PuzzleSource) -> Result<(), Box<dyn Error>> {
  let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
  let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();
  let mut repl = Repl {
    cfg,
    source,
    session: None,
    timers: TimerController::new(tick_tx),
    fetch_tx,
    pending_fetch: None,
    carried_total: 0,
  };

  render::say(MsgKind::Info, "Guess the phrase behind the emojis. Type `help` for commands.");
  repl.request_new_puzzle();

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    tokio::select! {
      line = lines.next_line() => {
        match line? {
          Some(line) => {
            if !repl.handle_line(&line).await {
              break;
            }
          }
          None => break,
        }
      }
      Some(tick) = tick_rx.recv() => repl.handle_tick(tick).await,
      Some(outcome) = fetch_rx.recv() => repl.handle_fetch(outcome),
      _ = tokio::signal::ctrl_c() => break,
    }
  }

  // Flush the report before returning: the runtime is dropped right after
  // `run`, and a spawned task would be cancelled at its first await.
  if let Some(report) = repl.take_unfinished_report() {
    repl.source.log_result(&report).await;
  }
  info!(target: "guessmoji", "Goodbye");
  Ok(())
}

impl Repl {
  /// Returns false when the player asked to quit.
  async fn handle_line(&mut self, line: &str) -> bool {
    let Some(cmd) = parse_command(line) else {
      if !line.trim().is_empty() {
        render::say(MsgKind::Error, "Unknown command. Type `help`.");
      }
      return true;
    };
    match cmd {
      Command::Quit => return false,
      Command::Help => print_help(),
      Command::NewPuzzle => self.request_new_puzzle(),
      Command::Status => self.render_board(),
      Command::Guess(text) => self.drive(|s| s.submit_guess(&text)).await,
      Command::Advance => self.drive(|s| s.advance(&mut thread_rng())).await,
      Command::LetterHint => self.drive(|s| s.request_letter_hint(&mut thread_rng())).await,
      Command::Skip => self.drive(|s| s.skip_to_answer()).await,
      Command::PauseToggle => self.drive(|s| s.toggle_pause()).await,
    }
    true
  }

  async fn drive(&mut self, op: impl FnOnce(&mut GameSession) -> Transition) {
    let Some(session) = self.session.as_mut() else {
      render::say(MsgKind::Error, "No puzzle in play. Type `new` to fetch one.");
      return;
    };
    let transition = op(session);
    self.apply(transition).await;
  }

  async fn apply(&mut self, transition: Transition) {
    match transition {
      Transition::LetterRevealed { .. } => {
        render::say(MsgKind::Info, "A letter appears.");
        self.render_board();
      }
      Transition::LetterUnavailable => {
        render::say(MsgKind::Info, "No letters left to reveal.");
      }
      Transition::WordRevealed { .. } => {
        render::say(MsgKind::Info, "A word is revealed.");
        self.render_board();
      }
      Transition::FinalAnswerStarted => {
        self.timers.stop_auto_hint();
        if let Some(s) = &self.session {
          self.timers.start_final_answer(s.round);
          render::say(
            MsgKind::Info,
            &format!(
              "Only the last words stand between you and the answer. One guess, {} seconds!",
              s.timers.final_answer_remaining
            ),
          );
        }
        self.render_board();
      }
      Transition::Won { base, bonus } => {
        self.timers.stop_all();
        if bonus > 0 {
          render::say(
            MsgKind::Success,
            &format!("Correct! +{base} points and a +{bonus} speed bonus."),
          );
        } else {
          render::say(MsgKind::Success, &format!("Correct! +{base} points."));
        }
        self.finish_round();
      }
      Transition::Lost { kind } => {
        self.timers.stop_all();
        let text = match kind {
          LossKind::WrongFinalAnswer => "Wrong final answer. Round over.",
          LossKind::FinalAnswerTimeout => "Time's up. Round over.",
          LossKind::AllWordsRevealed => "Every word is out. Round over.",
          LossKind::StepsExhausted => "Out of steps. The answer is revealed.",
          LossKind::Skipped => "Answer revealed.",
        };
        render::say(MsgKind::Error, text);
        if let Some(s) = &self.session {
          render::say(MsgKind::Info, &format!("The phrase was: \"{}\"", s.puzzle.phrase));
          if let Some(explanation) = &s.puzzle.explanation {
            render::say(MsgKind::Info, explanation);
          }
        }
        self.finish_round();
      }
      Transition::WrongGuess => render::say(MsgKind::Error, "Incorrect. Try again!"),
      Transition::EmptyGuess => render::say(MsgKind::Error, "Please enter a guess."),
      Transition::Paused(true) => render::say(MsgKind::Info, "Hints paused."),
      Transition::Paused(false) => render::say(MsgKind::Info, "Hints resumed."),
      Transition::Denied(reason) => render::say(MsgKind::Error, reason),
    }
  }

  /// Bank the total, report the round once, and leave the solved board on
  /// screen until the next puzzle is requested.
  fn finish_round(&mut self) {
    let Some(session) = self.session.as_mut() else { return };
    self.carried_total = session.score.total_score;
    if !session.result_logged() {
      session.mark_result_logged();
      let report = session.report();
      let source = self.source.clone();
      tokio::spawn(async move {
        source.log_result(&report).await;
      });
    }
    self.render_board();
    render::say(
      MsgKind::Info,
      &format!("Total score: {}. Type `new` for another puzzle.", self.carried_total),
    );
  }

  /// Exactly one abandonment report for a round dropped before it concluded.
  /// Delivery runs in the background; the new puzzle never waits on it.
  fn log_unfinished_round(&mut self) {
    let Some(report) = self.take_unfinished_report() else { return };
    let source = self.source.clone();
    tokio::spawn(async move {
      source.log_result(&report).await;
    });
  }

  /// Marks the current round as reported and hands back its report, or `None`
  /// when there is no round or it was already reported.
  fn take_unfinished_report(&mut self) -> Option<RoundReport> {
    let session = self.session.as_mut()?;
    if session.result_logged() {
      return None;
    }
    session.mark_result_logged();
    info!(target: "game", round = %session.round, "Reporting abandoned round");
    Some(session.report())
  }

  fn request_new_puzzle(&mut self) {
    self.log_unfinished_round();
    self.timers.stop_all();
    self.session = None;

    let fetch = Uuid::new_v4();
    self.pending_fetch = Some(fetch);
    render::say(MsgKind::Info, "Fetching a new puzzle...");
    let source = self.source.clone();
    let tx = self.fetch_tx.clone();
    tokio::spawn(async move {
      let result = source.next_puzzle().await;
      // The receiver only goes away at shutdown.
      let _ = tx.send(FetchOutcome { fetch, result });
    });
  }

  fn handle_fetch(&mut self, outcome: FetchOutcome) {
    if self.pending_fetch != Some(outcome.fetch) {
      debug!(target: "guessmoji", fetch = %outcome.fetch, "Discarding stale fetch result");
      return;
    }
    self.pending_fetch = None;
    match outcome.result {
      Ok(puzzle) => {
        let session = GameSession::new(puzzle, self.carried_total, &self.cfg);
        if self.cfg.auto_advance {
          self.timers.start_auto_hint(session.round);
        }
        self.session = Some(session);
        self.render_board();
        render::say(MsgKind::Info, "Guess with `guess <phrase>`, or `hint` for the next step.");
      }
      Err(e) => {
        render::say(MsgKind::Error, &format!("Could not fetch a puzzle: {e}"));
        render::say(MsgKind::Info, "Type `new` to try again.");
      }
    }
  }

  async fn handle_tick(&mut self, tick: TimerTick) {
    let Some(session) = self.session.as_mut() else { return };
    if tick.round != session.round {
      debug!(target: "game", round = %tick.round, "Discarding tick from a superseded round");
      return;
    }
    match tick.kind {
      TimerKind::AutoHint => match session.timers.tick_auto() {
        Tick::Expired => {
          let transition = session.advance(&mut thread_rng());
          self.apply(transition).await;
        }
        Tick::Counting(n) if n <= 3 => {
          render::say(MsgKind::Info, &format!("Next hint in {n}..."));
        }
        _ => {}
      },
      TimerKind::FinalAnswer => {
        if session.phase() != GamePhase::FinalAnswer {
          return;
        }
        match session.timers.tick_final() {
          Tick::Expired => {
            let transition = session.final_answer_timeout();
            self.apply(transition).await;
          }
          Tick::Counting(n) => render::say(MsgKind::Info, &format!("{n}...")),
          Tick::Frozen => {}
        }
      }
    }
  }

  fn render_board(&self) {
    let Some(session) = &self.session else { return };
    println!();
    println!("  {}", render::header_line(&session.puzzle));
    println!("  {}", render::phrase_line(&session.puzzle, &session.reveal));
    println!("  {}", render::status_line(session));
    println!();
  }
}

fn print_help() {
  println!("Commands:");
  println!("  guess <phrase>  submit a guess (g)");
  println!("  hint            advance to the next step and take its hint (advance, next)");
  println!("  letter          buy one random letter (l)");
  println!("  skip            give up and reveal the answer");
  println!("  pause           pause or resume automatic hints");
  println!("  status          reprint the board");
  println!("  new             fetch the next puzzle (n)");
  println!("  quit            leave the game (q)");
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds;
  use tokio::sync::mpsc::UnboundedReceiver;

  fn test_repl() -> (Repl, UnboundedReceiver<TimerTick>, UnboundedReceiver<FetchOutcome>) {
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
    let repl = Repl {
      cfg: GameConfig::default(),
      source: PuzzleSource::Builtin,
      session: None,
      timers: TimerController::new(tick_tx),
      fetch_tx,
      pending_fetch: None,
      carried_total: 0,
    };
    (repl, tick_rx, fetch_rx)
  }

  fn start_round(repl: &mut Repl) {
    repl.session = Some(GameSession::new(seeds::hard_fallback_puzzle(), 0, &repl.cfg));
  }

  #[tokio::test]
  async fn exit_flush_reports_an_abandoned_round_exactly_once() {
    let (mut repl, _tick_rx, _fetch_rx) = test_repl();
    assert!(repl.take_unfinished_report().is_none());

    start_round(&mut repl);
    let report = repl.take_unfinished_report().expect("first take yields the report");
    repl.source.log_result(&report).await;
    assert_eq!(report.solved_correctly, "no");
    assert!(repl.take_unfinished_report().is_none());
  }

  #[tokio::test]
  async fn a_finished_round_is_not_reported_again_at_exit() {
    let (mut repl, _tick_rx, _fetch_rx) = test_repl();
    start_round(&mut repl);
    repl.finish_round();
    assert!(repl.take_unfinished_report().is_none());
  }
}
