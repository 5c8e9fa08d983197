//! Countdown machinery: pure per-second countdown state (lives inside the
//! session, trivially testable) plus the async controller that owns the
//! spawned 1 Hz tickers.
//!
//! At most one ticker per timer is ever in flight. Starting a ticker aborts
//! the previous one first, and every tick carries the round id it was started
//! for, so a superseded round can never receive a live tick.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use uuid::Uuid;

/// Result of applying one elapsed second to a countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
  /// Countdown is paused; nothing moved.
  Frozen,
  /// Seconds remaining after the tick.
  Counting(u32),
  /// The countdown hit zero on this tick.
  Expired,
}

/// Countdown values for one round. Pausing freezes the auto-hint countdown at
/// its current value; the final-answer countdown cannot be paused.
#[derive(Clone, Debug)]
pub struct TimerState {
  pub auto_hint_remaining: u32,
  pub final_answer_remaining: u32,
  pub paused: bool,
  auto_hint_interval: u32,
  final_answer_duration: u32,
}

impl TimerState {
  pub fn new(auto_hint_interval: u32, final_answer_duration: u32) -> Self {
    Self {
      auto_hint_remaining: auto_hint_interval,
      final_answer_remaining: final_answer_duration,
      paused: false,
      auto_hint_interval,
      final_answer_duration,
    }
  }

  /// One second on the auto-hint countdown. On expiry the countdown reloads
  /// its full interval so the next cycle starts immediately.
  pub fn tick_auto(&mut self) -> Tick {
    if self.paused {
      return Tick::Frozen;
    }
    self.auto_hint_remaining = self.auto_hint_remaining.saturating_sub(1);
    if self.auto_hint_remaining == 0 {
      self.auto_hint_remaining = self.auto_hint_interval;
      Tick::Expired
    } else {
      Tick::Counting(self.auto_hint_remaining)
    }
  }

  /// One second on the final-answer countdown. Pause has no effect here.
  pub fn tick_final(&mut self) -> Tick {
    self.final_answer_remaining = self.final_answer_remaining.saturating_sub(1);
    if self.final_answer_remaining == 0 {
      Tick::Expired
    } else {
      Tick::Counting(self.final_answer_remaining)
    }
  }

  /// Reset the final-answer countdown to its full duration (entering the
  /// final-answer phase).
  pub fn arm_final(&mut self) {
    self.final_answer_remaining = self.final_answer_duration;
  }

  pub fn toggle_pause(&mut self) -> bool {
    self.paused = !self.paused;
    self.paused
  }
}

/// Which countdown a tick belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
  AutoHint,
  FinalAnswer,
}

/// One delivered second, tagged with the round it was scheduled for.
#[derive(Clone, Copy, Debug)]
pub struct TimerTick {
  pub round: Uuid,
  pub kind: TimerKind,
}

/// Owns the spawned tickers and their cancellation. Dropping the controller
/// aborts everything.
pub struct TimerController {
  tx: UnboundedSender<TimerTick>,
  auto_hint: Option<JoinHandle<()>>,
  final_answer: Option<JoinHandle<()>>,
}

impl TimerController {
  pub fn new(tx: UnboundedSender<TimerTick>) -> Self {
    Self { tx, auto_hint: None, final_answer: None }
  }

  pub fn start_auto_hint(&mut self, round: Uuid) {
    self.stop_auto_hint();
    self.auto_hint = Some(spawn_ticker(self.tx.clone(), round, TimerKind::AutoHint));
  }

  pub fn start_final_answer(&mut self, round: Uuid) {
    self.stop_final_answer();
    self.final_answer = Some(spawn_ticker(self.tx.clone(), round, TimerKind::FinalAnswer));
  }

  pub fn stop_auto_hint(&mut self) {
    if let Some(h) = self.auto_hint.take() {
      h.abort();
    }
  }

  pub fn stop_final_answer(&mut self) {
    if let Some(h) = self.final_answer.take() {
      h.abort();
    }
  }

  pub fn stop_all(&mut self) {
    self.stop_auto_hint();
    self.stop_final_answer();
  }
}

impl Drop for TimerController {
  fn drop(&mut self) {
    self.stop_all();
  }
}

fn spawn_ticker(tx: UnboundedSender<TimerTick>, round: Uuid, kind: TimerKind) -> JoinHandle<()> {
  tokio::spawn(async move {
    let mut interval = time::interval(Duration::from_secs(1));
    // The first interval tick completes immediately; skip it so ticks arrive
    // one second apart starting one second from now.
    interval.tick().await;
    loop {
      interval.tick().await;
      if tx.send(TimerTick { round, kind }).is_err() {
        break;
      }
    }
  })
}
