//! Math Blitz - arithmetic questions for an arcade shooter
//!
//! Core modules:
//! - `quiz`: Question generation, answer validation, rewards and the session
//!   state machine that pauses the game while a question is shown
//! - `settings`: JSON-backed preferences
//! - `error`: Configuration errors

pub mod error;
pub mod quiz;
pub mod settings;

pub use error::{ConfigError, Error, Result};
pub use quiz::{GradeLevel, PowerupType, Question, QuestionSession};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second; deadlines are counted in ticks
    pub const SIM_HZ: u32 = 60;

    /// Seconds the player has to answer before the question times out
    pub const DEFAULT_ANSWER_DEADLINE_SECS: u32 = 25;
    /// Undrained session events kept before the oldest are dropped
    pub const MAX_QUEUED_EVENTS: usize = 64;
    /// Redraw bound for constrained question strategies
    pub const MAX_GENERATION_ATTEMPTS: u32 = 50;

    /// Resource caps
    pub const MAX_WEAPON_LEVEL: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Score for any correct answer
    pub const CORRECT_BASE_SCORE: u64 = 100;
    /// Paid instead of a weapon or life the player can't hold
    pub const OVERFLOW_SCORE_BONUS: u64 = 200;

    /// Post-question invulnerability (3 s / 1 s at 60 Hz)
    pub const CORRECT_INVULNERABLE_TICKS: u32 = 180;
    pub const INCORRECT_INVULNERABLE_TICKS: u32 = 60;

    /// Percent chance a destroyed enemy drops a powerup
    pub const DROP_CHANCE_PERCENT: i64 = 30;
    /// Relative drop weights: weapon, shield, life, bomb, missile, score
    pub const DROP_WEIGHTS: [i64; 6] = [20, 20, 15, 10, 20, 15];
}
