use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

use crate::setup::TablesMax;

/// One multiplication to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub left: u8,
    pub right: u8,
}

impl Question {
    pub fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    pub fn product(&self) -> u32 {
        self.left as u32 * self.right as u32
    }
}

/// Where operands come from. Production draws at random; tests script them.
pub trait QuestionSource {
    fn next_question(&mut self, tables_max: TablesMax) -> Question;
}

/// Uniform draws from `0..=tables_max`, repeats allowed
#[derive(Debug)]
pub struct RandomQuestions {
    rng: StdRng,
}

impl RandomQuestions {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomQuestions {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionSource for RandomQuestions {
    fn next_question(&mut self, tables_max: TablesMax) -> Question {
        let max = tables_max.get();
        Question::new(self.rng.gen_range(0..=max), self.rng.gen_range(0..=max))
    }
}

/// Replays a fixed list of questions, then falls back to random draws.
/// Operands are still clamped to the configured table.
#[derive(Debug, Default)]
pub struct ScriptedQuestions {
    queue: VecDeque<Question>,
    fallback: RandomQuestions,
}

impl ScriptedQuestions {
    pub fn new<I: IntoIterator<Item = (u8, u8)>>(questions: I) -> Self {
        Self {
            queue: questions
                .into_iter()
                .map(|(l, r)| Question::new(l, r))
                .collect(),
            fallback: RandomQuestions::seeded(0),
        }
    }
}

impl QuestionSource for ScriptedQuestions {
    fn next_question(&mut self, tables_max: TablesMax) -> Question {
        match self.queue.pop_front() {
            Some(q) => {
                let max = tables_max.get();
                Question::new(q.left.min(max), q.right.min(max))
            }
            None => self.fallback.next_question(tables_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{MAX_TABLES, MIN_TABLES};

    #[test]
    fn random_operands_within_table() {
        let mut source = RandomQuestions::seeded(42);
        for max in MIN_TABLES..=MAX_TABLES {
            let tm = TablesMax::clamped(max);
            for _ in 0..500 {
                let q = source.next_question(tm);
                assert!(q.left <= max, "left {} > {}", q.left, max);
                assert!(q.right <= max, "right {} > {}", q.right, max);
            }
        }
    }

    #[test]
    fn random_draws_cover_zero_and_max() {
        let mut source = RandomQuestions::seeded(7);
        let tm = TablesMax::clamped(3);
        let draws: Vec<Question> = (0..1000).map(|_| source.next_question(tm)).collect();
        assert!(draws.iter().any(|q| q.left == 0));
        assert!(draws.iter().any(|q| q.right == 3));
    }

    #[test]
    fn product_fits_three_digits() {
        assert_eq!(Question::new(12, 12).product(), 144);
        assert_eq!(Question::new(0, 9).product(), 0);
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut source = ScriptedQuestions::new([(3, 4), (2, 2)]);
        let tm = TablesMax::clamped(5);
        assert_eq!(source.next_question(tm), Question::new(3, 4));
        assert_eq!(source.next_question(tm), Question::new(2, 2));
        let q = source.next_question(tm);
        assert!(q.left <= 5 && q.right <= 5);
    }

    #[test]
    fn scripted_clamps_to_table() {
        let mut source = ScriptedQuestions::new([(11, 9)]);
        let q = source.next_question(TablesMax::clamped(4));
        assert_eq!(q, Question::new(4, 4));
    }
}
