//! Accuracy counters for a game round

use serde::{Deserialize, Serialize};

use super::question::GradeLevel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    total_asked: u32,
    total_correct: u32,
}

/// Read-only view for summary screens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_asked: u32,
    pub total_correct: u32,
    /// 0.0 when nothing has been asked
    pub accuracy: f64,
    pub grade: GradeLevel,
}

impl Statistics {
    /// Count one resolved question
    pub fn record(&mut self, correct: bool) {
        self.total_asked = self.total_asked.saturating_add(1);
        if correct {
            self.total_correct = self.total_correct.saturating_add(1);
        }
    }

    pub fn total_asked(&self) -> u32 {
        self.total_asked
    }

    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_asked == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_asked)
        }
    }

    pub fn snapshot(&self, grade: GradeLevel) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_asked: self.total_asked,
            total_correct: self.total_correct,
            accuracy: self.accuracy(),
            grade,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
