//! Random selection of the next quiz question.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Where quiz questions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    /// Category id `0` on the wire.
    AnyCategory,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizScope::AnyCategory,
            id => QuizScope::Category(id),
        }
    }
}

/// Picks one question uniformly at random among `candidates` whose id is not
/// in `excluded`. `None` when nothing is left to ask.
pub fn pick_question<R>(
    candidates: Vec<Question>,
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();
    remaining.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: "answer".into(),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn zero_means_any_category() {
        assert_eq!(QuizScope::from(0), QuizScope::AnyCategory);
        assert_eq!(QuizScope::from(4), QuizScope::Category(4));
    }

    #[test]
    fn never_returns_excluded_question() {
        let mut rng = StdRng::seed_from_u64(7);
        let excluded: HashSet<i64> = [1, 2, 4].into_iter().collect();
        for _ in 0..100 {
            let candidates = (1..=5).map(question).collect();
            let picked = pick_question(candidates, &excluded, &mut rng).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn exhausted_candidates_yield_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let excluded: HashSet<i64> = [1, 2].into_iter().collect();
        let candidates = vec![question(1), question(2)];
        assert!(pick_question(candidates, &excluded, &mut rng).is_none());
        assert!(pick_question(vec![], &HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn every_remaining_question_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let candidates = (1..=4).map(question).collect();
            seen.insert(pick_question(candidates, &HashSet::new(), &mut rng).unwrap().id);
        }
        assert_eq!(seen, HashSet::from([1, 2, 3, 4]));
    }
}
