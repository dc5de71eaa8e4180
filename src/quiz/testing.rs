//! In-memory collaborators for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use super::powerup::PowerupType;
use super::question::Question;
use super::reward::PlayerResources;
use super::session::{AnswerSender, GameWorld, QuestionPresenter, SessionId};

#[derive(Debug, Clone)]
pub struct FakePlayer {
    pub score: u64,
    pub shield: u32,
    pub lives: u8,
    pub missiles: u32,
    pub weapon_level: u8,
    pub invulnerable: u32,
    pub cleared_all: u32,
    pub cleared_fractions: Vec<f32>,
}

impl Default for FakePlayer {
    fn default() -> Self {
        Self {
            score: 0,
            shield: 0,
            lives: 3,
            missiles: 0,
            weapon_level: 1,
            invulnerable: 0,
            cleared_all: 0,
            cleared_fractions: Vec::new(),
        }
    }
}

impl PlayerResources for FakePlayer {
    fn grant_score(&mut self, amount: u64) {
        self.score += amount;
    }

    fn grant_shield(&mut self, amount: u32) {
        self.shield = (self.shield + amount).min(25);
    }

    fn grant_life(&mut self) -> bool {
        if self.lives >= 5 {
            return false;
        }
        self.lives += 1;
        true
    }

    fn grant_missiles(&mut self, amount: u32) {
        self.missiles = (self.missiles + amount).min(100);
    }

    fn upgrade_weapon(&mut self) -> bool {
        if self.weapon_level >= 3 {
            return false;
        }
        self.weapon_level += 1;
        true
    }

    fn clear_all_enemies(&mut self) {
        self.cleared_all += 1;
    }

    fn clear_fraction(&mut self, fraction: f32) {
        self.cleared_fractions.push(fraction);
    }

    fn set_invulnerable(&mut self, ticks: u32) {
        self.invulnerable = ticks;
    }

    fn current_weapon_level(&self) -> u8 {
        self.weapon_level
    }

    fn current_life_count(&self) -> u8 {
        self.lives
    }
}

/// World stub that counts pause/resume calls and owns a player
#[derive(Debug, Default)]
pub struct FakeWorld {
    pub player: FakePlayer,
    pub paused: bool,
    pub pauses: u32,
    pub resumes: u32,
}

impl GameWorld for FakeWorld {
    fn pause_world(&mut self) {
        self.paused = true;
        self.pauses += 1;
    }

    fn resume_world(&mut self) {
        self.paused = false;
        self.resumes += 1;
    }
}

impl PlayerResources for FakeWorld {
    fn grant_score(&mut self, amount: u64) {
        self.player.grant_score(amount)
    }
    fn grant_shield(&mut self, amount: u32) {
        self.player.grant_shield(amount)
    }
    fn grant_life(&mut self) -> bool {
        self.player.grant_life()
    }
    fn grant_missiles(&mut self, amount: u32) {
        self.player.grant_missiles(amount)
    }
    fn upgrade_weapon(&mut self) -> bool {
        self.player.upgrade_weapon()
    }
    fn clear_all_enemies(&mut self) {
        self.player.clear_all_enemies()
    }
    fn clear_fraction(&mut self, fraction: f32) {
        self.player.clear_fraction(fraction)
    }
    fn set_invulnerable(&mut self, ticks: u32) {
        self.player.set_invulnerable(ticks)
    }
    fn current_weapon_level(&self) -> u8 {
        self.player.current_weapon_level()
    }
    fn current_life_count(&self) -> u8 {
        self.player.current_life_count()
    }
}

#[derive(Default)]
pub struct PresenterLog {
    pub shown: Vec<(Question, PowerupType)>,
    pub senders: Vec<AnswerSender>,
    pub dismissed: Vec<SessionId>,
}

/// Presenter that keeps every question and answer sender it receives
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub log: Rc<RefCell<PresenterLog>>,
}

impl RecordingPresenter {
    pub fn take_sender(&self) -> Option<AnswerSender> {
        self.log.borrow_mut().senders.pop()
    }

    pub fn shown_count(&self) -> usize {
        self.log.borrow().shown.len()
    }
}

impl QuestionPresenter for RecordingPresenter {
    fn present(&mut self, question: &Question, powerup: PowerupType, answer: AnswerSender) {
        let mut log = self.log.borrow_mut();
        log.shown.push((question.clone(), powerup));
        log.senders.push(answer);
    }

    fn dismiss(&mut self, id: SessionId) {
        self.log.borrow_mut().dismissed.push(id);
    }
}
