//! Score, multiplier and high-score tracking

use serde::{Deserialize, Serialize};

use super::events::{AchievementId, GameEvent};
use crate::consts::*;

/// Score state for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringEngine {
    score: u64,
    multiplier: u32,
    /// Ticks until the multiplier falls back to 1
    decay_ticks: u32,
    /// Consecutive player-bullet hits
    streak: u32,
    high_score: u64,
    survivor_reached: bool,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            score: 0,
            multiplier: 1,
            decay_ticks: 0,
            streak: 0,
            high_score: 0,
            survivor_reached: false,
        }
    }
}

impl ScoringEngine {
    /// Fresh engine seeded with a previously persisted high score
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Credit a kill; returns the points awarded
    pub fn on_kill(&mut self, base: u64) -> u64 {
        let awarded = base * self.multiplier as u64;
        self.score += awarded;
        awarded
    }

    /// Flat award that ignores the multiplier
    pub fn add_bonus(&mut self, points: u64) {
        self.score += points;
    }

    /// A player bullet landed: extend the streak and refresh the decay window.
    ///
    /// The multiplier only ever rises here.
    pub fn on_hit(&mut self, events: &mut Vec<GameEvent>) {
        self.streak += 1;
        self.decay_ticks = MULTIPLIER_DECAY_TICKS;
        let earned = (1 + self.streak / STREAK_PER_MULTIPLIER).min(MAX_MULTIPLIER);
        if earned > self.multiplier {
            self.multiplier = earned;
            events.push(GameEvent::MultiplierChanged(earned));
        }
    }

    /// A player bullet left the field unhit
    pub fn on_miss(&mut self) {
        self.streak = 0;
    }

    /// End-of-tick bookkeeping: multiplier decay, high score, survivor
    pub fn tick(&mut self, events: &mut Vec<GameEvent>) {
        if self.decay_ticks > 0 {
            self.decay_ticks -= 1;
            if self.decay_ticks == 0 {
                self.streak = 0;
                if self.multiplier != 1 {
                    self.multiplier = 1;
                    events.push(GameEvent::MultiplierChanged(1));
                }
            }
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::HighScore(self.score));
        }

        if !self.survivor_reached && self.score >= SURVIVOR_SCORE {
            self.survivor_reached = true;
            events.push(GameEvent::Achievement(AchievementId::Survivor));
        }
    }
}
