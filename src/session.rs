use crate::countdown::DEFAULT_COUNTDOWN_SECS;
use crate::distractor::DEFAULT_OPTIONS_PER_ROUND;
use crate::quiz::QuizState;
use crate::sampler::DEFAULT_ROUNDS;
use crate::score::RoundOutcome;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub rounds: usize,
    pub countdown_secs: u32,
    pub options_per_round: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            options_per_round: DEFAULT_OPTIONS_PER_ROUND,
        }
    }
}

/// What the presentation layer needs to draw the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub prompt: String,
    pub translations: BTreeMap<String, String>,
    pub image: Option<String>,
    pub options: Vec<String>,
    /// The bank could not supply as many options as requested.
    pub degraded: bool,
    /// Only revealed once the round has been answered or timed out.
    pub correct_answer: Option<String>,
    pub outcome: Option<RoundOutcome>,
}

/// Snapshot of a session after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub title: String,
    pub state: QuizState,
    pub current_index: usize,
    pub rounds_total: usize,
    /// `None` once the session has finished.
    pub current_round: Option<RoundView>,
    pub time_remaining: u32,
    pub countdown_secs: u32,
    pub last_selected_option: Option<String>,
    pub score: usize,
    /// Set only in `Finished` after a run with every round correct.
    pub perfect: bool,
}

impl SessionView {
    /// Fraction of the countdown still left, for gauges.
    pub fn time_ratio(&self) -> f64 {
        if self.countdown_secs == 0 {
            return 0.0;
        }
        (self.time_remaining as f64 / self.countdown_secs as f64).clamp(0.0, 1.0)
    }
}
