//! HUD collaborator
//!
//! Receives the handful of values a heads-up display shows. Implementations
//! must not fail; anything they cannot show is simply dropped.

use crate::sim::{AchievementId, PowerUpKind};

pub trait UiSink {
    fn score(&mut self, score: u64);
    fn health(&mut self, percent: u8);
    fn power_up(&mut self, kind: PowerUpKind, active: bool);

    fn multiplier(&mut self, _multiplier: u32) {}
    fn high_score(&mut self, _score: u64) {}
    fn achievement(&mut self, _id: AchievementId) {}
    fn game_over(&mut self, _score: u64) {}
}

/// Keeps the last value of each HUD field; useful headless and in tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudState {
    pub score: u64,
    pub health_percent: u8,
    pub shield: bool,
    pub rapid: bool,
    pub multiplier: u32,
    pub high_score: u64,
    pub notifications: Vec<String>,
    pub game_over: bool,
}

impl UiSink for HudState {
    fn score(&mut self, score: u64) {
        self.score = score;
    }

    fn health(&mut self, percent: u8) {
        self.health_percent = percent;
    }

    fn power_up(&mut self, kind: PowerUpKind, active: bool) {
        match kind {
            PowerUpKind::Shield => self.shield = active,
            PowerUpKind::Rapid => self.rapid = active,
            PowerUpKind::Bomb => {}
        }
    }

    fn multiplier(&mut self, multiplier: u32) {
        self.multiplier = multiplier;
    }

    fn high_score(&mut self, score: u64) {
        self.high_score = score;
    }

    fn achievement(&mut self, id: AchievementId) {
        self.notifications.push(format!("{}: {}", id.title(), id.description()));
    }

    fn game_over(&mut self, _score: u64) {
        self.game_over = true;
    }
}

/// Logs state changes instead of drawing them
#[derive(Debug, Default)]
pub struct LogUi {
    last_score: u64,
}

impl UiSink for LogUi {
    fn score(&mut self, score: u64) {
        if score != self.last_score {
            log::debug!("score {score}");
            self.last_score = score;
        }
    }

    fn health(&mut self, _percent: u8) {}

    fn power_up(&mut self, kind: PowerUpKind, active: bool) {
        log::info!("{} {}", kind.name(), if active { "on" } else { "off" });
    }

    fn game_over(&mut self, score: u64) {
        log::info!("GAME OVER - final score {score}");
    }
}
