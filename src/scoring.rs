//! Point arithmetic: award for a correct guess, the speed bonus, and the
//! letter-hint spend with its non-negative floor.

use crate::domain::SPEED_BONUS;

/// Score bookkeeping. `total_score` persists across rounds; the other fields
/// are round-scoped and reset with each new puzzle.
#[derive(Clone, Debug, Default)]
pub struct ScoreState {
  pub total_score: u32,
  pub letter_hints_used: u32,
  /// Points banked for the current round (0 until the round is won).
  pub round_awarded: u32,
}

/// Base award plus optional speed bonus. The bonus applies only when the round
/// was solved at step 1 with no hints of any kind consumed.
pub fn award_for_correct_guess(
  max_available: u32,
  step_at_solve: u8,
  hints_consumed: usize,
) -> (u32, u32) {
  let bonus = if step_at_solve == 1 && hints_consumed == 0 {
    SPEED_BONUS
  } else {
    0
  };
  (max_available, bonus)
}

/// Deduct a hint purchase, clamping at zero. Preconditions (hint cap, enough
/// points) are the caller's to enforce; this only does the arithmetic.
pub fn spend_on_letter_hint(total: u32, cost: u32) -> u32 {
  total.saturating_sub(cost)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn step_one_solve_with_no_hints_earns_the_bonus() {
    assert_eq!(award_for_correct_guess(100, 1, 0), (100, 50));
  }

  #[test]
  fn any_hint_forfeits_the_bonus() {
    assert_eq!(award_for_correct_guess(100, 1, 1), (100, 0));
    assert_eq!(award_for_correct_guess(70, 3, 0), (70, 0));
    assert_eq!(award_for_correct_guess(40, 7, 2), (40, 0));
  }

  #[test]
  fn spend_never_goes_negative() {
    assert_eq!(spend_on_letter_hint(25, 5), 20);
    assert_eq!(spend_on_letter_hint(3, 5), 0);
    assert_eq!(spend_on_letter_hint(0, 5), 0);
  }

  #[test]
  fn three_spends_from_twenty_five_leave_ten() {
    let mut total = 25;
    for _ in 0..3 {
      total = spend_on_letter_hint(total, 5);
    }
    assert_eq!(total, 10);
  }
}
