use crate::countdown::{Countdown, TickResult};
use crate::distractor::{build_round, QuizRound};
use crate::error::QuizError;
use crate::sampler::sample_questions;
use crate::score::{FinalScore, RoundOutcome, Scoreboard};
use crate::session::{QuizSettings, RoundView, SessionView};
use crate::topic::Topic;
use log::{debug, info};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum QuizState {
    Loading,
    Playing,
    Result,
    Finished,
}

/// One play-through of a topic, from `Loading` to `Finished`.
///
/// Commands that arrive in a state that does not accept them are ignored and
/// reported as `None`/`false`; timer ticks and key presses race by nature and
/// neither side should be punished for losing.
#[derive(Debug, Clone)]
pub struct QuizSession {
    title: String,
    settings: QuizSettings,
    rounds: Vec<QuizRound>,
    current_index: usize,
    state: QuizState,
    countdown: Countdown,
    scoreboard: Scoreboard,
    last_selected: Option<String>,
    closed: bool,
}

impl QuizSession {
    /// Sample the rounds for `topic` and leave the session in `Loading`.
    pub fn prepare<R>(topic: &Topic, settings: QuizSettings, rng: &mut R) -> Result<Self, QuizError>
    where
        R: Rng + ?Sized,
    {
        let rounds: Vec<QuizRound> = sample_questions(&topic.questions, settings.rounds, rng)
            .into_iter()
            .map(|q| build_round(q, &topic.questions, settings.options_per_round, rng))
            .collect();

        if rounds.is_empty() {
            return Err(QuizError::EmptyBank {
                topic: topic.title.clone(),
            });
        }

        debug!(
            "prepared {} rounds for '{}' ({} degraded)",
            rounds.len(),
            topic.title,
            rounds.iter().filter(|r| r.is_degraded()).count()
        );

        Ok(Self {
            title: topic.title.clone(),
            scoreboard: Scoreboard::new(rounds.len()),
            countdown: Countdown::new(settings.countdown_secs),
            settings,
            rounds,
            current_index: 0,
            state: QuizState::Loading,
            last_selected: None,
            closed: false,
        })
    }

    /// Prepare and immediately begin playing.
    pub fn start<R>(topic: &Topic, settings: QuizSettings, rng: &mut R) -> Result<Self, QuizError>
    where
        R: Rng + ?Sized,
    {
        let mut session = Self::prepare(topic, settings, rng)?;
        session.begin();
        Ok(session)
    }

    /// `Loading -> Playing` on the first round.
    pub fn begin(&mut self) -> bool {
        if self.closed || self.state != QuizState::Loading {
            return false;
        }

        info!("starting '{}' with {} rounds", self.title, self.rounds.len());
        self.current_index = 0;
        self.enter_playing();
        true
    }

    fn enter_playing(&mut self) {
        self.last_selected = None;
        self.countdown.arm(self.settings.countdown_secs);
        self.state = QuizState::Playing;
        debug!("round {} of {}", self.current_index + 1, self.rounds.len());
    }

    /// Advance the countdown by one second. Returns `TimedOut` if this tick ended the round.
    pub fn tick(&mut self) -> Option<RoundOutcome> {
        if self.closed || self.state != QuizState::Playing {
            return None;
        }

        match self.countdown.tick() {
            TickResult::Expired => {
                self.last_selected = None;
                Some(self.resolve(RoundOutcome::TimedOut))
            }
            TickResult::Running(_) | TickResult::Idle => None,
        }
    }

    /// Answer the current round. Text that matches no option simply counts as wrong.
    pub fn submit_answer(&mut self, option: &str) -> Option<RoundOutcome> {
        if self.closed || self.state != QuizState::Playing {
            return None;
        }

        self.countdown.cancel();
        let outcome = if self.rounds[self.current_index].is_correct(option) {
            RoundOutcome::Correct
        } else {
            RoundOutcome::Incorrect
        };
        self.last_selected = Some(option.to_string());
        Some(self.resolve(outcome))
    }

    /// Answer with the option at `index` of the current round.
    pub fn choose(&mut self, index: usize) -> Option<RoundOutcome> {
        let option = self.current_round()?.options.get(index)?.clone();
        self.submit_answer(&option)
    }

    fn resolve(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        self.scoreboard.record(self.current_index, outcome);
        self.state = QuizState::Result;
        debug!(
            "round {} {outcome}, score {}/{}",
            self.current_index + 1,
            self.scoreboard.score(),
            self.rounds.len()
        );
        outcome
    }

    /// `Result -> Playing` on the next round, or `Result -> Finished` after the last one.
    pub fn advance(&mut self) -> bool {
        if self.closed || self.state != QuizState::Result {
            return false;
        }

        if self.current_index + 1 < self.rounds.len() {
            self.current_index += 1;
            self.enter_playing();
        } else {
            self.state = QuizState::Finished;
            let result = self.scoreboard.final_score();
            info!(
                "finished '{}': {}/{}{}",
                self.title,
                result.score,
                result.total,
                if result.perfect { " (perfect)" } else { "" }
            );
        }
        true
    }

    /// Stop the session. The countdown is cancelled and nothing fires afterwards.
    pub fn close(&mut self) {
        if !self.closed {
            debug!("closing '{}' in {}", self.title, self.state);
        }
        self.countdown.cancel();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn rounds(&self) -> &[QuizRound] {
        &self.rounds
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The round being played or reviewed; `None` before `begin` and after finishing.
    pub fn current_round(&self) -> Option<&QuizRound> {
        match self.state {
            QuizState::Playing | QuizState::Result => self.rounds.get(self.current_index),
            QuizState::Loading | QuizState::Finished => None,
        }
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn score(&self) -> usize {
        self.scoreboard.score()
    }

    pub fn outcome(&self, round: usize) -> Option<RoundOutcome> {
        self.scoreboard.outcome(round)
    }

    pub fn last_selected_option(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }

    pub fn final_score(&self) -> Option<FinalScore> {
        (self.state == QuizState::Finished).then(|| self.scoreboard.final_score())
    }

    pub fn view(&self) -> SessionView {
        let current_round = self.current_round().map(|round| {
            let revealed = self.state == QuizState::Result;
            RoundView {
                prompt: round.prompt.clone(),
                translations: round.translations.clone(),
                image: round.image.clone(),
                options: round.options.clone(),
                degraded: round.is_degraded(),
                correct_answer: revealed.then(|| round.correct_answer.clone()),
                outcome: self.scoreboard.outcome(self.current_index),
            }
        });

        SessionView {
            title: self.title.clone(),
            state: self.state,
            current_index: self.current_index,
            rounds_total: self.rounds.len(),
            current_round,
            time_remaining: self.time_remaining(),
            countdown_secs: self.settings.countdown_secs,
            last_selected_option: self.last_selected.clone(),
            score: self.score(),
            perfect: self.final_score().is_some_and(|f| f.perfect),
        }
    }
}
