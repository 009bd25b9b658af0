use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum RoundOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

impl RoundOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, RoundOutcome::Correct)
    }
}

/// Final tally handed to the presentation layer once a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub score: usize,
    pub total: usize,
    /// Every round answered correctly. Purely informational, it never changes `score`.
    pub perfect: bool,
}

/// Per-round outcomes for one session. Each round is scored at most once.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    outcomes: Vec<Option<RoundOutcome>>,
    score: usize,
}

impl Scoreboard {
    pub fn new(rounds: usize) -> Self {
        Self {
            outcomes: vec![None; rounds],
            score: 0,
        }
    }

    /// Record the outcome of `round`. Returns false if the round was already scored
    /// or does not exist.
    pub fn record(&mut self, round: usize, outcome: RoundOutcome) -> bool {
        let Some(slot) = self.outcomes.get_mut(round) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }

        *slot = Some(outcome);
        if outcome.is_correct() {
            self.score += 1;
        }
        true
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcome(&self, round: usize) -> Option<RoundOutcome> {
        self.outcomes.get(round).copied().flatten()
    }

    pub fn outcomes(&self) -> &[Option<RoundOutcome>] {
        &self.outcomes
    }

    pub fn is_perfect(&self) -> bool {
        self.total() > 0 && self.score == self.total()
    }

    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            score: self.score,
            total: self.total(),
            perfect: self.is_perfect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(RoundOutcome::Correct.to_string(), "Correct");
        assert_eq!(RoundOutcome::TimedOut.to_string(), "TimedOut");
    }

    #[test]
    fn test_record_counts_correct_only() {
        let mut board = Scoreboard::new(3);

        assert!(board.record(0, RoundOutcome::Correct));
        assert!(board.record(1, RoundOutcome::Incorrect));
        assert!(board.record(2, RoundOutcome::TimedOut));

        assert_eq!(board.score(), 1);
        assert_eq!(board.outcome(1), Some(RoundOutcome::Incorrect));
        assert!(!board.is_perfect());
    }

    #[test]
    fn test_round_is_scored_once() {
        let mut board = Scoreboard::new(2);

        assert!(board.record(0, RoundOutcome::Correct));
        assert!(!board.record(0, RoundOutcome::Correct));
        assert!(!board.record(0, RoundOutcome::Incorrect));

        assert_eq!(board.score(), 1);
        assert_eq!(board.outcome(0), Some(RoundOutcome::Correct));
    }

    #[test]
    fn test_out_of_range_round_is_ignored() {
        let mut board = Scoreboard::new(1);
        assert!(!board.record(5, RoundOutcome::Correct));
        assert_eq!(board.score(), 0);
        assert_eq!(board.outcome(5), None);
    }

    #[test]
    fn test_final_score_perfect() {
        let mut board = Scoreboard::new(2);
        board.record(0, RoundOutcome::Correct);
        board.record(1, RoundOutcome::Correct);

        assert_eq!(
            board.final_score(),
            FinalScore {
                score: 2,
                total: 2,
                perfect: true
            }
        );
    }

    #[test]
    fn test_empty_board_is_not_perfect() {
        let board = Scoreboard::new(0);
        assert!(!board.final_score().perfect);
    }
}
