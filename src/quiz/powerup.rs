//! Powerup types and the enemy drop table

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::{DROP_CHANCE_PERCENT, DROP_WEIGHTS};

/// Powerup categories; each gates its own reward table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerupType {
    Weapon,
    Shield,
    Life,
    Bomb,
    Missile,
    Score,
}

impl PowerupType {
    pub const ALL: [PowerupType; 6] = [
        PowerupType::Weapon,
        PowerupType::Shield,
        PowerupType::Life,
        PowerupType::Bomb,
        PowerupType::Missile,
        PowerupType::Score,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerupType::Weapon => "Weapon Upgrade",
            PowerupType::Shield => "Shield",
            PowerupType::Life => "Extra Life",
            PowerupType::Bomb => "Screen Bomb",
            PowerupType::Missile => "Homing Missiles",
            PowerupType::Score => "Score Bonus",
        }
    }

    /// Relative drop weight (percent of all drops)
    pub fn drop_weight(&self) -> i64 {
        DROP_WEIGHTS[*self as usize]
    }
}

/// Roll whether a destroyed enemy drops a powerup, and which one
pub fn roll_drop(rng: &mut dyn RandomSource) -> Option<PowerupType> {
    if !rng.chance(DROP_CHANCE_PERCENT, 100) {
        return None;
    }
    let total: i64 = DROP_WEIGHTS.iter().sum();
    let mut roll = rng.next_int(0, total - 1);
    for kind in PowerupType::ALL {
        if roll < kind.drop_weight() {
            return Some(kind);
        }
        roll -= kind.drop_weight();
    }
    None
}
