//! Question session state machine
//!
//! One question at a time: `open` pauses the world and hands the question to
//! the presenter, then the first of (player answer, deadline) resolves it.
//! Resolution validates, counts, rewards, resumes the world and returns to
//! idle. Every other trigger is ignored.
//!
//! ```text
//! Idle --open--> Active --submit/deadline--> Resolving --> Idle
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;

use super::generator::QuestionGenerator;
use super::powerup::PowerupType;
use super::question::{GradeLevel, Question, QuestionKind};
use super::reward::{AppliedReward, PlayerResources, ResourceLevels, RewardEffect, RewardEngine};
use super::rng::{RandomSource, SeededRandom};
use super::stats::{Statistics, StatisticsSnapshot};
use super::validator;
use crate::consts::MAX_QUEUED_EVENTS;
use crate::settings::Settings;

/// Freezes and unfreezes the simulation around a question
pub trait GameWorld {
    fn pause_world(&mut self);
    fn resume_world(&mut self);
}

/// UI that shows the question and eventually reports an answer
pub trait QuestionPresenter {
    /// Show `question`. Send at most one answer through `answer`; dropping
    /// it without sending leaves resolution to the deadline.
    fn present(&mut self, question: &Question, powerup: PowerupType, answer: AnswerSender);

    /// The question was cancelled before it resolved
    fn dismiss(&mut self, _id: SessionId) {}
}

/// Identifies one question from open to resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Active,
    Resolving,
}

#[derive(Debug)]
struct Submission {
    id: SessionId,
    raw: Option<String>,
}

/// One-shot answer channel handed to the presenter
#[derive(Debug)]
pub struct AnswerSender {
    id: SessionId,
    tx: Sender<Submission>,
}

impl AnswerSender {
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Report the player's raw input
    pub fn submit(self, raw: impl Into<String>) {
        self.send(Some(raw.into()));
    }

    /// Report that no answer was given (closed modal, empty input)
    pub fn give_up(self) {
        self.send(None);
    }

    fn send(self, raw: Option<String>) {
        if self.tx.send(Submission { id: self.id, raw }).is_err() {
            log::debug!("Answer for {} dropped: session gone", self.id);
        }
    }
}

/// Result of `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(SessionId),
    /// Another question is in flight; the pickup is dropped
    Rejected,
}

/// How a question ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub id: SessionId,
    pub powerup: PowerupType,
    pub question: Question,
    pub raw_answer: Option<String>,
    pub correct: bool,
    pub timed_out: bool,
    pub effect: RewardEffect,
    pub applied: AppliedReward,
}

/// Notifications for HUD and audio collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    Opened {
        id: SessionId,
        powerup: PowerupType,
        kind: QuestionKind,
    },
    OpenRejected {
        powerup: PowerupType,
    },
    Resolved(Resolution),
    Cancelled {
        id: SessionId,
    },
}

#[derive(Debug)]
struct ActiveQuestion {
    id: SessionId,
    question: Question,
    powerup: PowerupType,
    remaining_ticks: u32,
}

/// Owns the single active question and everything that happens to it
pub struct QuestionSession<R: RandomSource = SeededRandom> {
    generator: QuestionGenerator,
    rewards: RewardEngine,
    rng: R,
    presenter: Box<dyn QuestionPresenter>,
    grade: GradeLevel,
    deadline_ticks: u32,
    state: SessionState,
    active: Option<ActiveQuestion>,
    stats: Statistics,
    next_id: u64,
    answers_tx: Sender<Submission>,
    answers_rx: Receiver<Submission>,
    /// Oldest events are dropped past `MAX_QUEUED_EVENTS`
    events: VecDeque<QuizEvent>,
}

impl QuestionSession<SeededRandom> {
    /// Session seeded from `settings.seed`, or from entropy when unset
    pub fn from_settings(settings: &Settings, presenter: Box<dyn QuestionPresenter>) -> Self {
        let rng = match settings.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        log::info!("Question RNG seed: {}", rng.seed());
        Self::new(settings, rng, presenter)
    }
}

impl<R: RandomSource> QuestionSession<R> {
    pub fn new(settings: &Settings, rng: R, presenter: Box<dyn QuestionPresenter>) -> Self {
        let (answers_tx, answers_rx) = mpsc::channel();
        Self {
            generator: QuestionGenerator::new(settings.max_generation_attempts),
            rewards: RewardEngine::new(settings.caps()),
            rng,
            presenter,
            grade: settings.grade,
            deadline_ticks: settings.deadline_ticks(),
            state: SessionState::Idle,
            active: None,
            stats: Statistics::default(),
            next_id: 1,
            answers_tx,
            answers_rx,
            events: VecDeque::new(),
        }
    }

    /// A powerup was collected: show a question for it.
    ///
    /// Rejected (and logged) while another question is in flight.
    pub fn open<W>(&mut self, powerup: PowerupType, world: &mut W) -> OpenOutcome
    where
        W: GameWorld + ?Sized,
    {
        if self.state != SessionState::Idle {
            log::warn!("Question already active, ignoring {powerup:?} pickup");
            self.push_event(QuizEvent::OpenRejected { powerup });
            return OpenOutcome::Rejected;
        }

        let question = self.generator.generate(self.grade, &mut self.rng);
        let id = SessionId(self.next_id);
        self.next_id += 1;
        log::info!(
            "Question {id} for {powerup:?} at {}: {} ({:?})",
            self.grade,
            question.display_text,
            question.kind
        );

        world.pause_world();
        self.state = SessionState::Active;
        self.push_event(QuizEvent::Opened {
            id,
            powerup,
            kind: question.kind,
        });
        let sender = AnswerSender {
            id,
            tx: self.answers_tx.clone(),
        };
        self.presenter.present(&question, powerup, sender);
        self.active = Some(ActiveQuestion {
            id,
            question,
            powerup,
            remaining_ticks: self.deadline_ticks,
        });
        OpenOutcome::Opened(id)
    }

    /// Resolve the active question with `raw` input. `None` when nothing is
    /// active or the question already resolved.
    ///
    /// An answer the presenter already sent through its `AnswerSender` came
    /// first: it resolves the question and `raw` is ignored.
    pub fn submit<W>(&mut self, raw: Option<&str>, world: &mut W) -> Option<Resolution>
    where
        W: GameWorld + PlayerResources + ?Sized,
    {
        if let Some(resolution) = self.apply_queued_answers(world) {
            log::debug!("Direct submission {raw:?} ignored: presenter answered first");
            return Some(resolution);
        }
        self.resolve(raw.map(str::to_string), false, world)
    }

    /// Advance one simulation tick: apply answers sent by the presenter, then
    /// count down the deadline.
    pub fn tick<W>(&mut self, world: &mut W) -> Option<Resolution>
    where
        W: GameWorld + PlayerResources + ?Sized,
    {
        if let Some(resolution) = self.apply_queued_answers(world) {
            return Some(resolution);
        }

        let expired = match self.active.as_mut() {
            Some(active) if self.state == SessionState::Active => {
                active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
                active.remaining_ticks == 0
            }
            _ => false,
        };
        if expired {
            log::info!("Question timed out");
            return self.resolve(None, true, world);
        }
        None
    }

    /// Drain the answer channel; the earliest answer for the active question
    /// resolves it and everything else is dropped.
    fn apply_queued_answers<W>(&mut self, world: &mut W) -> Option<Resolution>
    where
        W: GameWorld + PlayerResources + ?Sized,
    {
        let mut resolution = None;
        while let Ok(submission) = self.answers_rx.try_recv() {
            if resolution.is_none() && self.active_id() == Some(submission.id) {
                resolution = self.resolve(submission.raw, false, world);
            } else {
                log::debug!("Ignoring answer for {}: not the active question", submission.id);
            }
        }
        resolution
    }

    fn resolve<W>(
        &mut self,
        raw: Option<String>,
        timed_out: bool,
        world: &mut W,
    ) -> Option<Resolution>
    where
        W: GameWorld + PlayerResources + ?Sized,
    {
        if self.state != SessionState::Active {
            log::debug!("Resolution ignored in state {:?}", self.state);
            return None;
        }
        self.state = SessionState::Resolving;
        // Taking the question disarms its deadline
        let Some(active) = self.active.take() else {
            self.state = SessionState::Idle;
            return None;
        };

        let correct = validator::is_correct(&active.question, raw.as_deref());
        self.stats.record(correct);

        let effect = self
            .rewards
            .effect_for(active.powerup, correct, ResourceLevels::of(&*world));
        let applied = self.rewards.apply(&effect, &mut *world);
        world.resume_world();

        log::info!(
            "Question {} {} (answer {}, got {:?}): {}",
            active.id,
            if correct { "correct" } else { "incorrect" },
            active.question.answer,
            raw,
            effect.message
        );

        let resolution = Resolution {
            id: active.id,
            powerup: active.powerup,
            question: active.question,
            raw_answer: raw,
            correct,
            timed_out,
            effect,
            applied,
        };
        self.push_event(QuizEvent::Resolved(resolution.clone()));
        self.state = SessionState::Idle;
        Some(resolution)
    }

    /// Cancel an in-flight question (scene torn down). The world is left as
    /// is, statistics are untouched, and answers already sent are discarded.
    pub fn teardown(&mut self) {
        self.cancel_active();
    }

    /// New game: cancel any question, resume the world it paused and clear
    /// statistics and queued events
    pub fn reset<W: GameWorld + ?Sized>(&mut self, world: &mut W) {
        if self.cancel_active() {
            world.resume_world();
        }
        self.stats.reset();
        self.events.clear();
    }

    /// Returns whether a question was in flight
    fn cancel_active(&mut self) -> bool {
        let cancelled = match self.active.take() {
            Some(active) => {
                log::info!("Question {} cancelled", active.id);
                self.presenter.dismiss(active.id);
                self.push_event(QuizEvent::Cancelled { id: active.id });
                true
            }
            None => false,
        };
        while self.answers_rx.try_recv().is_ok() {}
        self.state = SessionState::Idle;
        cancelled
    }

    fn push_event(&mut self, event: QuizEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Takes effect on the next `open`
    pub fn set_grade(&mut self, level: i64) {
        let grade = GradeLevel::new(level);
        if grade.get() as i64 != level {
            log::warn!("Invalid grade level {level}, using {grade}");
        }
        self.grade = grade;
    }

    pub fn grade(&self) -> GradeLevel {
        self.grade
    }

    pub fn grade_name(&self) -> &'static str {
        self.grade.name()
    }

    pub fn statistics_snapshot(&self) -> StatisticsSnapshot {
        self.stats.snapshot(self.grade)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_question_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active.as_ref().map(|a| &a.question)
    }

    pub fn active_powerup(&self) -> Option<PowerupType> {
        self.active.as_ref().map(|a| a.powerup)
    }

    fn active_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Ticks left before the active question times out
    pub fn remaining_ticks(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.remaining_ticks)
    }

    /// Take queued events, oldest first. Hosts that only use the return
    /// values of `submit` and `tick` may skip this; the queue keeps the most
    /// recent `MAX_QUEUED_EVENTS`.
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        self.events.drain(..).collect()
    }
}
