use crate::topic::QuestionRecord;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of rounds a session asks for when nothing else is configured.
pub const DEFAULT_ROUNDS: usize = 10;

/// Pick up to `count` distinct records uniformly at random, in random order.
///
/// Returns fewer than `count` when the bank is smaller, and nothing for an empty bank.
pub fn sample_questions<'a, R>(bank: &'a [QuestionRecord], count: usize, rng: &mut R) -> Vec<&'a QuestionRecord>
where
    R: Rng + ?Sized,
{
    let mut pool: Vec<&QuestionRecord> = bank.iter().collect();
    let amount = count.min(pool.len());
    let (picked, _rest) = pool.partial_shuffle(rng, amount);
    picked.to_vec()
}
