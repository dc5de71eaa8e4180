//! Reward tables and their application to the player
//!
//! Every powerup has one row for a correct answer and one for a wrong one.
//! Rows that grant a capped resource (weapon level, lives) turn into a
//! score-only bonus once the player is already at the cap.

use serde::Serialize;

use super::powerup::PowerupType;
use crate::consts::{
    CORRECT_BASE_SCORE, CORRECT_INVULNERABLE_TICKS, INCORRECT_INVULNERABLE_TICKS,
    OVERFLOW_SCORE_BONUS,
};

/// Player state a reward can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resource {
    WeaponLevel,
    Life,
    Shield,
    Missiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceDelta {
    pub resource: Resource,
    pub amount: u32,
}

/// Enemy wipe triggered by a bomb
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ScreenClear {
    All,
    /// Share of on-screen enemies to destroy (0-1)
    Fraction(f32),
}

/// What resolving a question grants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardEffect {
    pub score_delta: u64,
    pub resource_delta: Option<ResourceDelta>,
    pub screen_clear: Option<ScreenClear>,
    pub invulnerability_ticks: u32,
    pub message: String,
}

impl RewardEffect {
    /// True when the effect only adds score
    pub fn is_score_only(&self) -> bool {
        self.resource_delta.is_none() && self.screen_clear.is_none()
    }
}

/// Player-side capability used to read levels and apply rewards
pub trait PlayerResources {
    fn grant_score(&mut self, amount: u64);
    fn grant_shield(&mut self, amount: u32);
    /// Returns false when lives are already full
    fn grant_life(&mut self) -> bool;
    fn grant_missiles(&mut self, amount: u32);
    /// Returns false when the weapon is already at max level
    fn upgrade_weapon(&mut self) -> bool;
    fn clear_all_enemies(&mut self);
    fn clear_fraction(&mut self, fraction: f32);
    fn set_invulnerable(&mut self, ticks: u32);
    fn current_weapon_level(&self) -> u8;
    fn current_life_count(&self) -> u8;
}

/// Snapshot of the capped resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceLevels {
    pub weapon_level: u8,
    pub lives: u8,
}

impl ResourceLevels {
    pub fn of<P: PlayerResources + ?Sized>(player: &P) -> Self {
        Self {
            weapon_level: player.current_weapon_level(),
            lives: player.current_life_count(),
        }
    }
}

/// Caps for the overflow rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCaps {
    pub max_weapon_level: u8,
    pub max_lives: u8,
}

impl Default for ResourceCaps {
    fn default() -> Self {
        Self {
            max_weapon_level: crate::consts::MAX_WEAPON_LEVEL,
            max_lives: crate::consts::MAX_LIVES,
        }
    }
}

/// Outcome of [`RewardEngine::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedReward {
    pub score_granted: u64,
    /// The player refused a capped resource and got the score bonus instead
    pub substituted: bool,
}

struct RewardRow {
    score: u64,
    grant: Option<ResourceDelta>,
    clear: Option<ScreenClear>,
    message: &'static str,
}

const fn grant(resource: Resource, amount: u32) -> Option<ResourceDelta> {
    Some(ResourceDelta { resource, amount })
}

/// Indexed by `PowerupType as usize`
const CORRECT_ROWS: [RewardRow; 6] = [
    RewardRow {
        score: CORRECT_BASE_SCORE,
        grant: grant(Resource::WeaponLevel, 1),
        clear: None,
        message: "Weapon upgraded! Ship repaired!",
    },
    RewardRow {
        score: CORRECT_BASE_SCORE,
        grant: grant(Resource::Shield, 15),
        clear: None,
        message: "Shield boosted! +15 shield",
    },
    RewardRow {
        score: CORRECT_BASE_SCORE,
        grant: grant(Resource::Life, 1),
        clear: None,
        message: "Life restored! +1 life",
    },
    RewardRow {
        score: CORRECT_BASE_SCORE,
        grant: None,
        clear: Some(ScreenClear::All),
        message: "Screen cleared! Every enemy destroyed",
    },
    RewardRow {
        score: CORRECT_BASE_SCORE,
        grant: grant(Resource::Missiles, 50),
        clear: None,
        message: "Missile resupply! +50 homing missiles",
    },
    RewardRow {
        score: CORRECT_BASE_SCORE + 500,
        grant: None,
        clear: None,
        message: "Score bonus! +500 points",
    },
];

const INCORRECT_ROWS: [RewardRow; 6] = [
    RewardRow {
        score: 50,
        grant: None,
        clear: None,
        message: "Repair incomplete: +50 consolation points",
    },
    RewardRow {
        score: 0,
        grant: grant(Resource::Shield, 5),
        clear: None,
        message: "Repair incomplete: +5 shield",
    },
    RewardRow {
        score: 0,
        grant: grant(Resource::Shield, 3),
        clear: None,
        message: "Repair incomplete: +3 shield",
    },
    RewardRow {
        score: 0,
        grant: None,
        clear: Some(ScreenClear::Fraction(0.3)),
        message: "Partial clear! Some enemies destroyed",
    },
    RewardRow {
        score: 0,
        grant: grant(Resource::Missiles, 20),
        clear: None,
        message: "Small resupply: +20 missiles",
    },
    RewardRow {
        score: 100,
        grant: None,
        clear: None,
        message: "+100 consolation points",
    },
];

/// Table-driven reward lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardEngine {
    caps: ResourceCaps,
}

impl RewardEngine {
    pub fn new(caps: ResourceCaps) -> Self {
        Self { caps }
    }

    pub fn caps(&self) -> ResourceCaps {
        self.caps
    }

    /// Effect for resolving a `powerup` question. `levels` feeds the overflow
    /// rule for weapon and life rewards.
    pub fn effect_for(
        &self,
        powerup: PowerupType,
        correct: bool,
        levels: ResourceLevels,
    ) -> RewardEffect {
        let (row, invulnerability_ticks) = if correct {
            (&CORRECT_ROWS[powerup as usize], CORRECT_INVULNERABLE_TICKS)
        } else {
            (&INCORRECT_ROWS[powerup as usize], INCORRECT_INVULNERABLE_TICKS)
        };

        let mut effect = RewardEffect {
            score_delta: row.score,
            resource_delta: row.grant,
            screen_clear: row.clear,
            invulnerability_ticks,
            message: row.message.to_string(),
        };

        let overflow = match row.grant.map(|g| g.resource) {
            Some(Resource::WeaponLevel) => levels.weapon_level >= self.caps.max_weapon_level,
            Some(Resource::Life) => levels.lives >= self.caps.max_lives,
            _ => false,
        };
        if overflow {
            effect.resource_delta = None;
            effect.score_delta += OVERFLOW_SCORE_BONUS;
            effect.message = match powerup {
                PowerupType::Life => format!("Lives full! +{OVERFLOW_SCORE_BONUS} bonus points"),
                _ => format!("Weapon maxed out! +{OVERFLOW_SCORE_BONUS} repair bonus"),
            };
        }
        effect
    }

    /// Apply an effect through the player capability.
    ///
    /// A capped grant the player refuses at this point still pays out the
    /// overflow score bonus.
    pub fn apply<P: PlayerResources + ?Sized>(
        &self,
        effect: &RewardEffect,
        player: &mut P,
    ) -> AppliedReward {
        let mut score = effect.score_delta;
        let mut substituted = false;

        if let Some(delta) = effect.resource_delta {
            let granted = match delta.resource {
                Resource::WeaponLevel => (0..delta.amount).all(|_| player.upgrade_weapon()),
                Resource::Life => (0..delta.amount).all(|_| player.grant_life()),
                Resource::Shield => {
                    player.grant_shield(delta.amount);
                    true
                }
                Resource::Missiles => {
                    player.grant_missiles(delta.amount);
                    true
                }
            };
            if !granted {
                log::debug!("{:?} refused at cap, paying score bonus", delta.resource);
                score += OVERFLOW_SCORE_BONUS;
                substituted = true;
            }
        }

        match effect.screen_clear {
            Some(ScreenClear::All) => player.clear_all_enemies(),
            Some(ScreenClear::Fraction(p)) => player.clear_fraction(p),
            None => {}
        }

        if score > 0 {
            player.grant_score(score);
        }
        player.set_invulnerable(effect.invulnerability_ticks);

        AppliedReward {
            score_granted: score,
            substituted,
        }
    }
}
