//! Multiple-choice quiz rounds
//!
//! A training session draws rounds from a cached pool of word pairs. Each
//! round consumes four pairs, so a session never quizzes the same pair twice;
//! once fewer than four pairs remain the session is over.

use crate::db::WordPair;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of answer options offered per round
pub const ROUND_SIZE: usize = 4;

/// One quiz prompt: a target word and the translations to choose from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Foreign word shown to the user
    pub target_word: String,
    /// Translation that counts as the right answer
    pub answer: String,
    /// All selectable translations in display order (includes `answer`)
    pub options: Vec<String>,
}

impl Round {
    /// Whether `text` is the right answer for this round.
    ///
    /// Candidates are not de-duplicated, so when another candidate shares the
    /// answer's translation either button is accepted.
    pub fn is_correct(&self, text: &str) -> bool {
        self.answer == text
    }
}

/// Outcome of the round-start procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// A round was produced; `remaining` is the pool minus the consumed pairs
    Round {
        round: Round,
        remaining: Vec<WordPair>,
    },
    /// Fewer than [`ROUND_SIZE`] pairs left
    Exhausted,
}

/// Draw the next round from `pool`.
///
/// The pool is shuffled, the last [`ROUND_SIZE`] pairs become the candidates
/// and the last of those is the correct one. Candidates are shuffled again
/// for display so the answer's position carries no information.
pub fn draw_round<R: Rng + ?Sized>(mut pool: Vec<WordPair>, rng: &mut R) -> Draw {
    if pool.len() < ROUND_SIZE {
        return Draw::Exhausted;
    }

    pool.shuffle(rng);
    let mut candidates = pool.split_off(pool.len() - ROUND_SIZE);

    let Some(correct) = candidates.last().cloned() else {
        return Draw::Exhausted;
    };
    candidates.shuffle(rng);

    Draw::Round {
        round: Round {
            target_word: correct.target,
            answer: correct.translation,
            options: candidates.into_iter().map(|p| p.translation).collect(),
        },
        remaining: pool,
    }
}
