//! Full question rounds through the public API

use std::cell::RefCell;
use std::rc::Rc;

use math_blitz::Settings;
use math_blitz::quiz::{
    AnswerSender, GameWorld, GradeLevel, PlayerResources, PowerupType, Question,
    QuestionPresenter, QuestionSession, QuizEvent, ScriptedRandom, SeededRandom,
};

#[derive(Default)]
struct Ship {
    paused: bool,
    score: u64,
    shield: u32,
    lives: u8,
    missiles: u32,
    weapon_level: u8,
    invulnerable: u32,
    enemies_cleared: bool,
}

impl GameWorld for Ship {
    fn pause_world(&mut self) {
        self.paused = true;
    }

    fn resume_world(&mut self) {
        self.paused = false;
    }
}

impl PlayerResources for Ship {
    fn grant_score(&mut self, amount: u64) {
        self.score += amount;
    }
    fn grant_shield(&mut self, amount: u32) {
        self.shield += amount;
    }
    fn grant_life(&mut self) -> bool {
        if self.lives >= 5 {
            return false;
        }
        self.lives += 1;
        true
    }
    fn grant_missiles(&mut self, amount: u32) {
        self.missiles += amount;
    }
    fn upgrade_weapon(&mut self) -> bool {
        if self.weapon_level >= 3 {
            return false;
        }
        self.weapon_level += 1;
        true
    }
    fn clear_all_enemies(&mut self) {
        self.enemies_cleared = true;
    }
    fn clear_fraction(&mut self, _fraction: f32) {}
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

/// Answers every question from a shared slot the test fills in
#[derive(Clone, Default)]
struct Inbox {
    questions: Rc<RefCell<Vec<Question>>>,
    sender: Rc<RefCell<Option<AnswerSender>>>,
}

impl QuestionPresenter for Inbox {
    fn present(&mut self, question: &Question, _powerup: PowerupType, answer: AnswerSender) {
        self.questions.borrow_mut().push(question.clone());
        *self.sender.borrow_mut() = Some(answer);
    }
}

fn ship() -> Ship {
    Ship {
        lives: 3,
        weapon_level: 1,
        ..Ship::default()
    }
}

#[test]
fn test_scripted_round_correct() {
    let inbox = Inbox::default();
    let mut session = QuestionSession::new(
        &Settings::default(),
        ScriptedRandom::new([0, 7, 5]),
        Box::new(inbox.clone()),
    );
    let mut world = ship();

    session.open(PowerupType::Life, &mut world);
    assert!(world.paused);
    assert_eq!(inbox.questions.borrow()[0].display_text, "7 + 5 = ?");

    let sender = inbox.sender.borrow_mut().take().unwrap();
    sender.submit(" 12 ");
    let resolution = session.tick(&mut world).unwrap();

    assert!(resolution.correct);
    assert!(!world.paused);
    assert_eq!(world.lives, 4);
    assert_eq!(world.score, 100);
    assert_eq!(world.invulnerable, 180);

    let stats = session.statistics_snapshot();
    assert_eq!((stats.total_asked, stats.total_correct), (1, 1));
}

#[test]
fn test_seeded_rounds_across_grades() {
    let inbox = Inbox::default();
    let settings = Settings {
        seed: Some(2024),
        ..Settings::default()
    };
    let mut session =
        QuestionSession::<SeededRandom>::from_settings(&settings, Box::new(inbox.clone()));
    let mut world = ship();

    for (round, powerup) in PowerupType::ALL.iter().cycle().take(30).enumerate() {
        session.set_grade(round as i64 % 3 + 1);
        session.open(*powerup, &mut world);
        let question = inbox.questions.borrow().last().cloned().unwrap();
        let sender = inbox.sender.borrow_mut().take().unwrap();
        // Every fourth answer is wrong on purpose
        let correct = round % 4 != 3;
        let typed = if correct {
            question.answer.to_string()
        } else {
            "nope".to_string()
        };
        sender.submit(typed);
        let resolution = session.tick(&mut world).unwrap();
        assert_eq!(resolution.correct, correct);
    }

    let stats = session.statistics_snapshot();
    assert_eq!(stats.total_asked, 30);
    assert_eq!(stats.total_correct, 23);
    assert!((stats.accuracy - 23.0 / 30.0).abs() < 1e-9);
    assert_eq!(stats.grade, GradeLevel::THREE);
    assert!(world.enemies_cleared);
    assert_eq!(world.weapon_level, 3);
    assert_eq!(world.missiles, 250);
}

#[test]
fn test_unanswered_question_times_out() {
    let inbox = Inbox::default();
    let settings = Settings {
        answer_deadline_secs: 2,
        seed: Some(5),
        ..Settings::default()
    };
    let mut session =
        QuestionSession::<SeededRandom>::from_settings(&settings, Box::new(inbox.clone()));
    let mut world = ship();

    session.open(PowerupType::Shield, &mut world);
    // Presenter closes without an answer; only the deadline resolves
    drop(inbox.sender.borrow_mut().take());

    let mut resolutions = Vec::new();
    for _ in 0..settings.deadline_ticks() * 2 {
        if let Some(resolution) = session.tick(&mut world) {
            resolutions.push(resolution);
        }
    }
    assert_eq!(resolutions.len(), 1);
    assert!(resolutions[0].timed_out);
    assert_eq!(world.shield, 5);

    let events = session.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], QuizEvent::Resolved(r) if !r.correct));
}
