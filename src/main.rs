//! Math Blitz console entry point
//!
//! Plays the question loop without a renderer. Commands, one per line:
//! `w s l b m x` collect a weapon/shield/life/bomb/missile/score powerup,
//! `k` destroys an enemy (which may drop one), `g1`..`g3` change grade and
//! `q` quits with a summary. While a question is shown the next line is the
//! answer.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Instant;

use math_blitz::consts::SIM_HZ;
use math_blitz::quiz::{
    AnswerSender, GameWorld, PlayerResources, PowerupType, Question, QuestionPresenter,
    QuestionSession, QuizEvent, ResourceCaps, SeededRandom, SessionId, roll_drop,
};
use math_blitz::{Result, Settings};

const START_ENEMIES: u32 = 12;

/// Ship and arena state the rewards act on
struct ConsoleWorld {
    caps: ResourceCaps,
    score: u64,
    shield: u32,
    lives: u8,
    missiles: u32,
    weapon_level: u8,
    invulnerable_ticks: u32,
    enemies: u32,
}

impl ConsoleWorld {
    fn new(caps: ResourceCaps) -> Self {
        Self {
            caps,
            score: 0,
            shield: 0,
            lives: 3,
            missiles: 0,
            weapon_level: 1,
            invulnerable_ticks: 0,
            enemies: START_ENEMIES,
        }
    }

    fn status(&self) -> String {
        format!(
            "score {} | lives {} | shield {} | weapon L{} | missiles {} | enemies {}",
            self.score, self.lives, self.shield, self.weapon_level, self.missiles, self.enemies
        )
    }
}

impl GameWorld for ConsoleWorld {
    fn pause_world(&mut self) {
        log::debug!("World paused");
    }

    fn resume_world(&mut self) {
        log::debug!("World resumed ({} ticks invulnerable)", self.invulnerable_ticks);
    }
}

impl PlayerResources for ConsoleWorld {
    fn grant_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    fn grant_shield(&mut self, amount: u32) {
        self.shield = self.shield.saturating_add(amount);
    }

    fn grant_life(&mut self) -> bool {
        if self.lives >= self.caps.max_lives {
            return false;
        }
        self.lives += 1;
        true
    }

    fn grant_missiles(&mut self, amount: u32) {
        self.missiles = self.missiles.saturating_add(amount);
    }

    fn upgrade_weapon(&mut self) -> bool {
        if self.weapon_level >= self.caps.max_weapon_level {
            return false;
        }
        self.weapon_level += 1;
        true
    }

    fn clear_all_enemies(&mut self) {
        self.enemies = 0;
    }

    fn clear_fraction(&mut self, fraction: f32) {
        let destroyed = (self.enemies as f32 * fraction).round() as u32;
        self.enemies -= destroyed.min(self.enemies);
    }

    fn set_invulnerable(&mut self, ticks: u32) {
        self.invulnerable_ticks = ticks;
    }

    fn current_weapon_level(&self) -> u8 {
        self.weapon_level
    }

    fn current_life_count(&self) -> u8 {
        self.lives
    }
}

/// The question currently waiting for a typed answer
struct Pending {
    sender: AnswerSender,
    shown_at: Instant,
}

/// Prints questions and parks the answer sender for the input loop
struct ConsolePresenter {
    pending: Rc<RefCell<Option<Pending>>>,
}

impl QuestionPresenter for ConsolePresenter {
    fn present(&mut self, question: &Question, powerup: PowerupType, answer: AnswerSender) {
        println!("[{}] {}", powerup.name(), question.display_text);
        *self.pending.borrow_mut() = Some(Pending {
            sender: answer,
            shown_at: Instant::now(),
        });
    }

    fn dismiss(&mut self, id: SessionId) {
        log::debug!("Dismissing question {id}");
        self.pending.borrow_mut().take();
    }
}

fn powerup_for(command: &str) -> Option<PowerupType> {
    match command {
        "w" => Some(PowerupType::Weapon),
        "s" => Some(PowerupType::Shield),
        "l" => Some(PowerupType::Life),
        "b" => Some(PowerupType::Bomb),
        "m" => Some(PowerupType::Missile),
        "x" => Some(PowerupType::Score),
        _ => None,
    }
}

/// Feed a typed answer, first replaying the wall-clock time spent on it as
/// simulation ticks so a slow answer times out.
fn answer(session: &mut QuestionSession, world: &mut ConsoleWorld, pending: Pending, line: &str) {
    let elapsed = pending.shown_at.elapsed().as_secs_f64();
    let ticks = (elapsed * f64::from(SIM_HZ)) as u64;
    for _ in 0..ticks {
        if session.tick(world).is_some() {
            println!("Time's up!");
            break;
        }
    }
    pending.sender.submit(line);
    session.tick(world);
}

fn report(session: &mut QuestionSession, world: &ConsoleWorld) {
    for event in session.drain_events() {
        match event {
            QuizEvent::Resolved(resolution) => {
                let verdict = if resolution.correct {
                    "Correct!"
                } else {
                    "Wrong."
                };
                println!(
                    "{verdict} {} = {}. {}",
                    resolution.question.display_text.trim_end_matches(" = ?"),
                    resolution.question.answer,
                    resolution.effect.message
                );
                println!("{}", world.status());
            }
            QuizEvent::OpenRejected { powerup } => {
                println!("Already answering a question, {} lost", powerup.name());
            }
            QuizEvent::Opened { .. } | QuizEvent::Cancelled { .. } => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Math Blitz (console) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let pending = Rc::new(RefCell::new(None));
    let presenter = ConsolePresenter {
        pending: Rc::clone(&pending),
    };
    let mut session = QuestionSession::from_settings(&settings, Box::new(presenter));
    let mut world = ConsoleWorld::new(settings.caps());
    // Drop rolls get their own stream so they never shift question draws
    let mut drops = match settings.seed {
        Some(seed) => SeededRandom::new(seed.wrapping_add(1)),
        None => SeededRandom::from_entropy(),
    };

    println!("Math Blitz - {}", session.grade_name());
    println!("w/s/l/b/m/x collect a powerup, k destroy an enemy, g1-g3 grade, q quit");
    println!("{}", world.status());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();

        let waiting = pending.borrow_mut().take();
        if let Some(waiting) = waiting {
            answer(&mut session, &mut world, waiting, command);
            report(&mut session, &world);
            continue;
        }

        match command {
            "q" => break,
            "k" => {
                if world.enemies == 0 {
                    world.enemies = START_ENEMIES;
                    println!("A new wave arrives");
                }
                world.enemies -= 1;
                world.grant_score(10);
                match roll_drop(&mut drops) {
                    Some(powerup) => {
                        session.open(powerup, &mut world);
                    }
                    None => println!("{}", world.status()),
                }
            }
            "g1" | "g2" | "g3" => {
                let level = command[1..].parse::<i64>().unwrap_or(1);
                session.set_grade(level);
                println!("Next question: {}", session.grade_name());
            }
            other => match powerup_for(other) {
                Some(powerup) => {
                    session.open(powerup, &mut world);
                }
                None if other.is_empty() => {}
                None => println!("Unknown command: {other}"),
            },
        }
        report(&mut session, &world);
        stdout.flush()?;
    }

    session.teardown();
    let summary = session.statistics_snapshot();
    println!(
        "Answered {} of {} correctly ({:.0}%) at {}",
        summary.total_correct,
        summary.total_asked,
        summary.accuracy * 100.0,
        summary.grade
    );
    log::info!(
        "Final stats: {}",
        serde_json::to_string(&summary).unwrap_or_default()
    );
    println!("Final score: {}", world.score);
    Ok(())
}
