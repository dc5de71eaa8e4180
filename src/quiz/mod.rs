//! Arithmetic question core
//!
//! - `rng`: injectable random source
//! - `question`: grades, kinds and the expression tree
//! - `generator`: per-grade strategies with bounded retries
//! - `validator`: answer parsing
//! - `reward` / `powerup`: reward tables and drop rolls
//! - `session`: the one-question-at-a-time state machine
//! - `stats`: accuracy counters

pub mod generator;
pub mod powerup;
pub mod question;
pub mod reward;
pub mod rng;
pub mod session;
pub mod stats;
pub mod validator;

#[cfg(test)]
mod testing;

pub use generator::{GenerationError, QuestionGenerator};
pub use powerup::{PowerupType, roll_drop};
pub use question::{Expr, GradeLevel, Question, QuestionKind};
pub use reward::{
    AppliedReward, PlayerResources, Resource, ResourceCaps, ResourceDelta, ResourceLevels,
    RewardEffect, RewardEngine, ScreenClear,
};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use session::{
    AnswerSender, GameWorld, OpenOutcome, QuestionPresenter, QuestionSession, QuizEvent,
    Resolution, SessionId, SessionState,
};
pub use stats::{Statistics, StatisticsSnapshot};
