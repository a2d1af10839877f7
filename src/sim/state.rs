//! Game state and core simulation types
//!
//! `GameState` is the explicit session context: every subsystem receives it
//! (or one of its parts) by `&mut`, nothing reaches for a global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::BossState;
use super::pattern::weapon_level;
use super::powerup::PowerUpManager;
use super::scoring::ScoringEngine;
use super::spawn::SpawnDirector;
use super::store::EntityStore;
use crate::Rect;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; ticks return without mutating gameplay state
    Paused,
    /// Terminal
    GameOver,
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy(u32),
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Strictly inside the field on both axes
    pub fn in_bounds(&self, field: Vec2) -> bool {
        self.pos.x > 0.0 && self.pos.x < field.x && self.pos.y > 0.0 && self.pos.y < field.y
    }
}

/// Bullet before it has been given an id and owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Ticks until the next shot may fire (fires at <= 0)
    pub shoot_timer: i32,
    pub health: i32,
    /// Bullets in flight, oldest first
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new(field: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                field.x / 2.0 - PLAYER_SIZE / 2.0,
                field.y - PLAYER_START_OFFSET,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            shoot_timer: 0,
            health: PLAYER_MAX_HEALTH,
            bullets: Vec::new(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Health as a 0-100 percentage for the HUD
    pub fn health_percent(&self) -> u8 {
        (self.health.clamp(0, PLAYER_MAX_HEALTH) * 100 / PLAYER_MAX_HEALTH) as u8
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Tank,
    Shooter,
    Asteroid,
    Boss,
}

/// Fixed per-kind attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub health: i32,
    pub speed: f32,
}

impl EnemyKind {
    /// Kinds the spawn director draws from
    pub const REGULAR: [EnemyKind; 5] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Shooter,
        EnemyKind::Asteroid,
    ];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                size: Vec2::splat(40.0),
                health: 100,
                speed: 2.0,
            },
            EnemyKind::Fast => EnemyStats {
                size: Vec2::splat(30.0),
                health: 100,
                speed: 5.0,
            },
            EnemyKind::Tank => EnemyStats {
                size: Vec2::splat(60.0),
                health: 200,
                speed: 1.0,
            },
            EnemyKind::Shooter => EnemyStats {
                size: Vec2::splat(40.0),
                health: 100,
                speed: 1.5,
            },
            EnemyKind::Asteroid => EnemyStats {
                size: Vec2::splat(40.0),
                health: 50,
                speed: 1.0,
            },
            EnemyKind::Boss => EnemyStats {
                size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
                health: BOSS_HEALTH,
                speed: BOSS_SPEED,
            },
        }
    }

    /// Base score for a kill, before the multiplier
    pub fn kill_score(self) -> u64 {
        match self {
            EnemyKind::Boss => BOSS_KILL_SCORE,
            _ => BASE_KILL_SCORE,
        }
    }

    /// Asteroids carry no health bar
    pub fn shows_health_bar(self) -> bool {
        self != EnemyKind::Asteroid
    }
}

/// An enemy entity (bosses included)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    /// Always a positive per-kind constant
    pub max_health: i32,
    /// Ticks until the next shot (fires at <= 0)
    pub shoot_timer: i32,
    /// Bullets this enemy has fired, oldest first
    pub bullets: Vec<Bullet>,
    /// Present only for `EnemyKind::Boss`
    pub boss: Option<BossState>,
}

impl Enemy {
    /// Fresh enemy of `kind` at `pos` with that kind's stats
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            size: stats.size,
            speed: stats.speed,
            health: stats.health,
            max_health: stats.health,
            shoot_timer: 0,
            bullets: Vec::new(),
            boss: (kind == EnemyKind::Boss).then(BossState::default),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Remaining health as a fraction of max, for health bars
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Play-field size (width, height)
    pub field: Vec2,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub entities: EntityStore,
    pub spawner: SpawnDirector,
    pub powerups: PowerUpManager,
    pub scoring: ScoringEngine,
    /// Enemies destroyed by gunfire this session
    pub kills: u32,
    /// Kills since the last missed shot
    pub kills_since_miss: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT))
    }

    pub fn with_field(seed: u64, field: Vec2) -> Self {
        Self {
            seed,
            field,
            phase: GamePhase::Playing,
            time_ticks: 0,
            entities: EntityStore::new(Player::new(field)),
            spawner: SpawnDirector::default(),
            powerups: PowerUpManager::default(),
            scoring: ScoringEngine::default(),
            kills: 0,
            kills_since_miss: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Current weapon level, always derived from score
    pub fn weapon_level(&self) -> u32 {
        weapon_level(self.scoring.score())
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
