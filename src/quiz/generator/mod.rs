//! Question generation
//!
//! Each grade registers a list of strategies. A strategy makes a single
//! draw and either returns an expression or rejects the draw when it misses
//! the strategy's numeric guard (carry, borrow, bound). The generator redraws
//! with the same strategy up to `max_attempts` times and then falls back to a
//! single-digit addition, so `generate` always returns a question.

mod grade1;
mod grade2;
mod grade3;

use thiserror::Error;

use super::question::{Expr, GradeLevel, Question, QuestionKind};
use super::rng::RandomSource;
use crate::consts::MAX_GENERATION_ATTEMPTS;

/// Why a strategy failed to produce a question
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("{kind:?} draw rejected: {reason}")]
    Rejected {
        kind: QuestionKind,
        reason: &'static str,
    },
    #[error("{kind:?} found no valid draw in {attempts} attempts")]
    Exhausted { kind: QuestionKind, attempts: u32 },
}

type DrawFn = fn(&mut dyn RandomSource) -> Result<Expr, GenerationError>;

/// A registered strategy: the kind it produces and its single-draw function
#[derive(Clone, Copy)]
pub(crate) struct Strategy {
    pub kind: QuestionKind,
    pub draw: DrawFn,
}

/// Reject the current draw unless `ok` holds
pub(crate) fn ensure(
    ok: bool,
    kind: QuestionKind,
    reason: &'static str,
) -> Result<(), GenerationError> {
    if ok {
        Ok(())
    } else {
        Err(GenerationError::Rejected { kind, reason })
    }
}

fn registry(grade: GradeLevel) -> &'static [Strategy] {
    match grade.get() {
        1 => grade1::STRATEGIES,
        2 => grade2::STRATEGIES,
        _ => grade3::STRATEGIES,
    }
}

/// Kinds registered for a grade, in selection order
pub fn strategies(grade: GradeLevel) -> impl Iterator<Item = QuestionKind> {
    registry(grade).iter().map(|s| s.kind)
}

/// Bounded rejection-sampling question generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGenerator {
    max_attempts: u32,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(MAX_GENERATION_ATTEMPTS)
    }
}

impl QuestionGenerator {
    /// `max_attempts` is raised to at least 1
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generate a question from a uniformly chosen strategy of `grade`
    pub fn generate(&self, grade: GradeLevel, rng: &mut dyn RandomSource) -> Question {
        let strategies = registry(grade);
        let last = strategies.len() as i64 - 1;
        let index = rng.next_int(0, last) as usize;
        self.run(strategies[index], rng)
    }

    /// Generate a question from one specific strategy
    pub fn generate_kind(&self, kind: QuestionKind, rng: &mut dyn RandomSource) -> Question {
        let strategy = GradeLevel::ALL
            .iter()
            .flat_map(|g| registry(*g).iter())
            .find(|s| s.kind == kind);
        match strategy {
            Some(strategy) => self.run(*strategy, rng),
            None => fallback(rng),
        }
    }

    /// Draw until the strategy's guard passes or the attempt bound is hit
    pub(crate) fn try_generate(
        &self,
        strategy: Strategy,
        rng: &mut dyn RandomSource,
    ) -> Result<Question, GenerationError> {
        for _ in 0..self.max_attempts {
            match (strategy.draw)(rng) {
                Ok(expr) => return Ok(Question::from_expr(strategy.kind, &expr)),
                Err(err) => log::trace!("{err}"),
            }
        }
        Err(GenerationError::Exhausted {
            kind: strategy.kind,
            attempts: self.max_attempts,
        })
    }

    fn run(&self, strategy: Strategy, rng: &mut dyn RandomSource) -> Question {
        match self.try_generate(strategy, rng) {
            Ok(question) => question,
            Err(err) => {
                log::warn!("{err}; using single-digit addition");
                fallback(rng)
            }
        }
    }
}

/// Trivial `a + b` with single digits
pub fn fallback(rng: &mut dyn RandomSource) -> Question {
    let a = rng.next_int(1, 9);
    let b = rng.next_int(1, 9);
    Question::from_expr(QuestionKind::Fallback, &Expr::add(Expr::num(a), Expr::num(b)))
}
