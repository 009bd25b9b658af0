use crate::topic::QuestionRecord;
use itertools::Itertools;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Options shown per round when the bank is large enough.
pub const DEFAULT_OPTIONS_PER_ROUND: usize = 4;

/// One question instance with its generated option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRound {
    pub question_id: String,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub image: Option<String>,
    pub translations: BTreeMap<String, String>,
    /// How many options the round asked for; fewer were available when degraded.
    pub requested_options: usize,
}

impl QuizRound {
    pub fn is_degraded(&self) -> bool {
        self.options.len() < self.requested_options
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    pub fn correct_position(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }
}

/// Build a round for `question`, drawing distractors from the other answers in `bank`.
///
/// Candidates exclude the question itself (by id) and any text equal to the correct
/// answer, and are deduplicated by exact string. A bank too small to fill
/// `options_per_round` yields a degraded round rather than an error.
pub fn build_round<R>(
    question: &QuestionRecord,
    bank: &[QuestionRecord],
    options_per_round: usize,
    rng: &mut R,
) -> QuizRound
where
    R: Rng + ?Sized,
{
    let requested_options = options_per_round.max(1);
    let wanted = requested_options - 1;

    let mut candidates: Vec<&str> = bank
        .iter()
        .filter(|other| other.id != question.id)
        .map(|other| other.correct_answer.as_str())
        .filter(|answer| *answer != question.correct_answer)
        .unique()
        .collect();

    let take = wanted.min(candidates.len());
    let (distractors, _rest) = candidates.partial_shuffle(rng, take);

    let mut options: Vec<String> = Vec::with_capacity(requested_options);
    options.push(question.correct_answer.clone());
    options.extend(distractors.iter().map(|d| d.to_string()));
    options.shuffle(rng);

    let round = QuizRound {
        question_id: question.id.clone(),
        prompt: question.prompt.clone(),
        correct_answer: question.correct_answer.clone(),
        options,
        image: question.image.clone(),
        translations: question.translations.clone(),
        requested_options,
    };

    if round.is_degraded() {
        warn!(
            "question '{}' has only {} of {} options",
            question.id,
            round.options.len(),
            requested_options
        );
    }

    round
}
