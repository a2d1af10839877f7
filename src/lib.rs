//! Star Siege - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (entities, spawning, bosses, scoring)
//! - `session`: One play session wiring the simulation to its collaborators
//! - `platform`: Input feed (logical keys, one-shot latching)
//! - `audio`, `ui`, `renderer`: Sinks for the events the simulation emits
//! - `highscores`, `achievements`: Persistence and achievement collaborators
//! - `persistence`: Versioned JSON save/load
//! - `autopilot`: Scripted player for headless demo runs

pub mod achievements;
pub mod audio;
pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Default play-field size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Distance of the player's top edge from the bottom of the field at spawn
    pub const PLAYER_START_OFFSET: f32 = 100.0;
    /// Ticks between shots
    pub const SHOOT_COOLDOWN: i32 = 15;
    pub const RAPID_SHOOT_COOLDOWN: i32 = 5;

    /// Player bullets
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;

    /// Weapon levels step up every this many points
    pub const WEAPON_LEVEL_SCORE_STEP: u64 = 500;
    pub const MAX_WEAPON_LEVEL: u32 = 5;

    /// Damage model
    pub const ENEMY_BULLET_DAMAGE: i32 = 10;
    pub const CONTACT_DAMAGE: i32 = 1;
    pub const BASE_BULLET_DAMAGE: i32 = 25;

    /// Score model
    pub const BASE_KILL_SCORE: u64 = 100;
    pub const BOSS_KILL_SCORE: u64 = 500;
    pub const BOSS_DEFEAT_BONUS: u64 = 500;
    pub const SURVIVOR_SCORE: u64 = 1000;
    pub const SHARPSHOOTER_KILLS: u32 = 10;

    /// Multiplier policy: +1 per this many consecutive hits, capped
    pub const STREAK_PER_MULTIPLIER: u32 = 10;
    pub const MAX_MULTIPLIER: u32 = 5;
    /// Ticks without a hit before the multiplier falls back to 1
    pub const MULTIPLIER_DECAY_TICKS: u32 = 180;

    /// Enemy spawn cadence
    pub const INITIAL_SPAWN_COUNTDOWN: f32 = 60.0;
    pub const MAX_SPAWN_INTERVAL: f32 = 120.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 30.0;
    /// Interval shrinks by this many ticks per 1000 points
    pub const SPAWN_INTERVAL_DECAY_PER_1000: f32 = 30.0;
    pub const POST_BOSS_SPAWN_COUNTDOWN: f32 = 120.0;
    pub const FIRST_BOSS_SCORE: u64 = 1000;
    pub const BOSS_SCORE_STEP: u64 = 1000;

    /// Shooter enemies
    pub const SHOOTER_COOLDOWN: i32 = 120;
    pub const SHOOTER_MAX_INITIAL_COOLDOWN: f32 = 60.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_BULLET_SIZE: f32 = 4.0;

    /// Boss
    pub const BOSS_WIDTH: f32 = 200.0;
    pub const BOSS_HEIGHT: f32 = 100.0;
    pub const BOSS_HEALTH: i32 = 1000;
    pub const BOSS_SPEED: f32 = 2.0;
    /// Engage sweep: left for the first window, right for the second
    pub const BOSS_SWEEP_TICKS: u32 = 60;

    /// Power-ups
    pub const POWER_UP_DURATION: u32 = 300;

    /// Explosion particle counts
    pub const IMPACT_PARTICLES: u32 = 5;
    pub const ENEMY_EXPLOSION_PARTICLES: u32 = 20;
    pub const BOSS_EXPLOSION_PARTICLES: u32 = 50;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap test; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}
