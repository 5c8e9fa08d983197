//! The game session: one owned aggregate per round (puzzle, reveal state,
//! step state, score, countdowns) plus the step-indexed progression machine.
//!
//! Every mutation goes through a method returning a [`Transition`]; callers
//! (the shell, the timer driver) act on the transition, never on internals.
//! Precondition violations come back as `Transition::Denied`; nothing here
//! panics or errors past the caller.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::domain::{step_spec, GamePhase, Puzzle, StepKind, STEP_COUNT};
use crate::guess::{self, Verdict};
use crate::protocol::RoundReport;
use crate::reveal::{RevealError, RevealState};
use crate::scoring::{self, ScoreState};
use crate::timer::TimerState;

/// Why a round ended without a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossKind {
  /// Wrong guess during the final-answer countdown.
  WrongFinalAnswer,
  /// The final-answer countdown ran out.
  FinalAnswerTimeout,
  /// A hint reveal left no words hidden.
  AllWordsRevealed,
  /// The step machine ran through step 8.
  StepsExhausted,
  /// The player asked for the answer.
  Skipped,
}

/// Externally visible outcome of one command against the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
  LetterRevealed { word: usize, letter: usize },
  /// A letter step fired but every position was already visible.
  LetterUnavailable,
  WordRevealed { word: usize },
  /// The pending word hint would have left the puzzle unguessable; the
  /// final-answer countdown starts instead.
  FinalAnswerStarted,
  Won { base: u32, bonus: u32 },
  Lost { kind: LossKind },
  /// Wrong guess while ordinary play continues.
  WrongGuess,
  EmptyGuess,
  Paused(bool),
  Denied(&'static str),
}

/// One round of play. Created when a puzzle arrives, discarded when the next
/// one is fetched; the running total carries over via `ScoreState`.
pub struct GameSession {
  pub round: Uuid,
  pub puzzle: Puzzle,
  pub reveal: RevealState,
  pub score: ScoreState,
  pub timers: TimerState,
  current_step: u8,
  steps_completed: BTreeSet<u8>,
  phase: GamePhase,
  max_available_points: u32,
  letter_hint_cost: u32,
  max_letter_hints: u32,
  solved: bool,
  result_logged: bool,
}

impl GameSession {
  pub fn new(puzzle: Puzzle, carried_total: u32, cfg: &GameConfig) -> Self {
    let reveal = RevealState::new(&puzzle.words);
    let round = Uuid::new_v4();
    info!(
      target: "game",
      %round,
      category = %puzzle.category,
      words = puzzle.words.len(),
      "New round started"
    );
    Self {
      round,
      puzzle,
      reveal,
      score: ScoreState { total_score: carried_total, ..ScoreState::default() },
      timers: TimerState::new(cfg.auto_hint_interval_secs, cfg.final_answer_secs),
      current_step: 1,
      steps_completed: BTreeSet::new(),
      phase: GamePhase::Playing,
      max_available_points: step_spec(1).points,
      letter_hint_cost: cfg.letter_hint_cost,
      max_letter_hints: cfg.max_letter_hints,
      solved: false,
      result_logged: false,
    }
  }

  pub fn phase(&self) -> GamePhase {
    self.phase
  }

  pub fn current_step(&self) -> u8 {
    self.current_step
  }

  pub fn max_available_points(&self) -> u32 {
    self.max_available_points
  }

  pub fn step_name(&self) -> &'static str {
    step_spec(self.current_step).name
  }

  /// Name of the step an `advance` would target, if any remain.
  pub fn next_step_name(&self) -> Option<&'static str> {
    (self.current_step < STEP_COUNT).then(|| step_spec(self.current_step + 1).name)
  }

  /// Steps whose hint actions have already executed.
  #[allow(dead_code)]
  pub fn steps_completed(&self) -> &BTreeSet<u8> {
    &self.steps_completed
  }

  pub fn result_logged(&self) -> bool {
    self.result_logged
  }

  pub fn mark_result_logged(&mut self) {
    self.result_logged = true;
  }

  /// Move to the next step and execute its hint action. A word-hint step that
  /// would leave one word or none hidden is redirected into the final-answer
  /// countdown instead; revealing hints must never make the puzzle
  /// unguessable.
  #[instrument(level = "info", skip(self, rng), fields(round = %self.round, step = self.current_step))]
  pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
    if self.phase != GamePhase::Playing {
      return Transition::Denied("the round is not in play");
    }
    if self.current_step >= STEP_COUNT {
      return Transition::Denied("no steps remain");
    }

    let next = self.current_step + 1;
    let spec = step_spec(next);
    if spec.kind == StepKind::WordHint && self.reveal.unrevealed_word_count() <= 2 {
      self.enter_final_answer();
      return Transition::FinalAnswerStarted;
    }

    self.steps_completed.insert(self.current_step);
    self.current_step = next;
    self.max_available_points = spec.points;
    info!(target: "game", round = %self.round, step = next, points = spec.points, "Step advanced");

    match spec.kind {
      StepKind::LetterHint => match self.reveal.reveal_random_letter(rng) {
        Ok((word, letter)) => Transition::LetterRevealed { word, letter },
        Err(RevealError::NoAvailablePositions) => Transition::LetterUnavailable,
      },
      StepKind::WordHint => self.execute_word_hint(),
      StepKind::RevealAnswer => {
        // Ran out of steps: the answer is shown and the round reports as a
        // loss, but the machine completed rather than being abandoned.
        self.reveal.reveal_all();
        self.max_available_points = 0;
        self.phase = GamePhase::Completed;
        Transition::Lost { kind: LossKind::StepsExhausted }
      }
      StepKind::Start => Transition::Denied("the start step has no hint"),
    }
  }

  /// Give up: force step 8, reveal everything, zero points.
  #[instrument(level = "info", skip(self), fields(round = %self.round))]
  pub fn skip_to_answer(&mut self) -> Transition {
    if self.phase.is_terminal() {
      return Transition::Denied("the round is already over");
    }
    self.steps_completed.insert(self.current_step);
    self.current_step = STEP_COUNT;
    self.max_available_points = 0;
    self.reveal.reveal_all();
    self.phase = GamePhase::Abandoned;
    Transition::Lost { kind: LossKind::Skipped }
  }

  /// Evaluate a guess. Identical evaluation in `Playing` and `FinalAnswer`;
  /// only the handling of a wrong answer differs per phase.
  #[instrument(level = "info", skip(self, raw), fields(round = %self.round, guess_len = raw.len()))]
  pub fn submit_guess(&mut self, raw: &str) -> Transition {
    if self.phase.is_terminal() {
      return Transition::Denied("the round is already over");
    }
    match guess::evaluate(raw, &self.puzzle.phrase) {
      Verdict::Empty => Transition::EmptyGuess,
      Verdict::Correct => {
        // Purchased letters and step hints both land in the reveal tally, so
        // one count covers "no hints of any kind".
        let (base, bonus) = scoring::award_for_correct_guess(
          self.max_available_points,
          self.current_step,
          self.reveal.reveal_count(),
        );
        self.score.round_awarded = base + bonus;
        self.score.total_score += base + bonus;
        self.solved = true;
        self.reveal.reveal_all();
        self.phase = GamePhase::Completed;
        info!(target: "game", round = %self.round, base, bonus, total = self.score.total_score, "Round won");
        Transition::Won { base, bonus }
      }
      Verdict::Incorrect => {
        if self.phase == GamePhase::FinalAnswer {
          // Strict rule: a wrong final answer is an immediate loss. Scoring
          // is identical to a timeout; only the message differs.
          self.end_abandoned();
          Transition::Lost { kind: LossKind::WrongFinalAnswer }
        } else {
          Transition::WrongGuess
        }
      }
    }
  }

  /// The final-answer countdown ran out.
  #[instrument(level = "info", skip(self), fields(round = %self.round))]
  pub fn final_answer_timeout(&mut self) -> Transition {
    if self.phase != GamePhase::FinalAnswer {
      return Transition::Denied("no final-answer countdown is running");
    }
    self.end_abandoned();
    Transition::Lost { kind: LossKind::FinalAnswerTimeout }
  }

  /// Purchase one random letter reveal. Denied requests change nothing.
  #[instrument(level = "info", skip(self, rng), fields(round = %self.round))]
  pub fn request_letter_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
    if self.phase != GamePhase::Playing {
      return Transition::Denied("letter hints are only available during open play");
    }
    if self.score.letter_hints_used >= self.max_letter_hints {
      return Transition::Denied("no letter hint purchases remain");
    }
    if self.score.total_score < self.letter_hint_cost {
      return Transition::Denied("not enough points for a letter hint");
    }
    match self.reveal.reveal_random_letter(rng) {
      Ok((word, letter)) => {
        self.score.total_score =
          scoring::spend_on_letter_hint(self.score.total_score, self.letter_hint_cost);
        self.score.letter_hints_used += 1;
        Transition::LetterRevealed { word, letter }
      }
      Err(RevealError::NoAvailablePositions) => Transition::LetterUnavailable,
    }
  }

  /// Toggle the auto-hint pause. Rejected during the final-answer countdown
  /// and once the round is over.
  pub fn toggle_pause(&mut self) -> Transition {
    match self.phase {
      GamePhase::Playing => Transition::Paused(self.timers.toggle_pause()),
      GamePhase::FinalAnswer => Transition::Denied("the final-answer countdown cannot be paused"),
      _ => Transition::Denied("the round is already over"),
    }
  }

  /// Round summary for the result sink.
  pub fn report(&self) -> RoundReport {
    RoundReport {
      category: self.puzzle.category.clone(),
      phrase: self.puzzle.phrase.clone(),
      emojis_list: self.puzzle.emojis.clone(),
      solved_correctly: if self.solved { "yes" } else { "no" }.into(),
      letter_hints_used: self.score.letter_hints_used,
      puzzle_score: self.score.round_awarded,
      total_score_at_end: self.score.total_score,
    }
  }

  fn enter_final_answer(&mut self) {
    // Step and point ceiling stay where they are; a correct answer during the
    // countdown still earns the current ceiling.
    self.phase = GamePhase::FinalAnswer;
    self.timers.arm_final();
    info!(
      target: "game",
      round = %self.round,
      points = self.max_available_points,
      "Final-answer countdown started"
    );
  }

  fn execute_word_hint(&mut self) -> Transition {
    let Some(word) = self.reveal.first_unrevealed_word() else {
      // Only reachable if reveal state drifted ahead of the step machine.
      warn!(target: "game", round = %self.round, "Word hint fired with nothing hidden");
      self.end_abandoned();
      return Transition::Lost { kind: LossKind::AllWordsRevealed };
    };
    self.reveal.reveal_word(word);
    if self.reveal.all_words_revealed() {
      // All hints exhausted without a correct guess: a loss, not a neutral
      // state.
      self.end_abandoned();
      Transition::Lost { kind: LossKind::AllWordsRevealed }
    } else {
      Transition::WordRevealed { word }
    }
  }

  fn end_abandoned(&mut self) {
    self.max_available_points = 0;
    self.reveal.reveal_all();
    self.phase = GamePhase::Abandoned;
    info!(target: "game", round = %self.round, "Round abandoned");
  }
}
