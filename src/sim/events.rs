//! Events emitted by a tick
//!
//! The simulation never draws, plays sound or touches storage. Everything the
//! outside world needs to react to is pushed here and dispatched by the host
//! after the tick has fully completed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;
use crate::consts::*;

/// Named audio triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Single-shot weapon fired
    Shoot,
    /// Multi-shot weapon fired
    AltShoot,
    /// Player bullet hit an enemy that survived
    EnemyHit,
    /// Enemy destroyed
    EnemyExplode,
    /// Player took damage
    PlayerHit,
    ShieldActivate,
    RapidFireActivate,
    BombActivate,
    Achievement,
    BossAppear,
}

impl SoundEffect {
    /// Stable trigger name used by audio backends
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::AltShoot => "altShoot",
            SoundEffect::EnemyHit => "enemyHit",
            SoundEffect::EnemyExplode => "enemyExplode",
            SoundEffect::PlayerHit => "playerHit",
            SoundEffect::ShieldActivate => "shieldActivate",
            SoundEffect::RapidFireActivate => "rapidFireActivate",
            SoundEffect::BombActivate => "bombActivate",
            SoundEffect::Achievement => "achievement",
            SoundEffect::BossAppear => "bossAppear",
        }
    }
}

/// Achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    /// Destroy the first enemy
    FirstKill,
    /// Several kills in a row without a missed shot
    Sharpshooter,
    /// Reach the survivor score
    Survivor,
    /// Defeat a boss
    BossKiller,
}

impl AchievementId {
    pub const ALL: [AchievementId; 4] = [
        AchievementId::FirstKill,
        AchievementId::Sharpshooter,
        AchievementId::Survivor,
        AchievementId::BossKiller,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AchievementId::FirstKill => "firstKill",
            AchievementId::Sharpshooter => "sharpshooter",
            AchievementId::Survivor => "survivor",
            AchievementId::BossKiller => "bossKiller",
        }
    }

    /// Display name
    pub fn title(self) -> &'static str {
        match self {
            AchievementId::FirstKill => "First Blood",
            AchievementId::Sharpshooter => "Sharpshooter",
            AchievementId::Survivor => "Survivor",
            AchievementId::BossKiller => "Boss Killer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstKill => "Destroy your first enemy",
            AchievementId::Sharpshooter => "Get 10 kills without missing",
            AchievementId::Survivor => "Reach 1000 points",
            AchievementId::BossKiller => "Defeat a boss",
        }
    }
}

/// What caused an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Player bullet struck an enemy
    Impact,
    /// Enemy destroyed by gunfire
    EnemyDestroyed,
    /// Enemy rammed by the player
    Collision,
    /// Enemy wiped by a bomb
    Bomb,
    /// Boss arrival flash
    BossArrival,
    /// Boss defeated
    BossDestroyed,
}

impl ExplosionKind {
    /// Particle budget for the renderer
    pub fn particles(self) -> u32 {
        match self {
            ExplosionKind::Impact => IMPACT_PARTICLES,
            ExplosionKind::EnemyDestroyed | ExplosionKind::Collision | ExplosionKind::Bomb => {
                ENEMY_EXPLOSION_PARTICLES
            }
            ExplosionKind::BossArrival | ExplosionKind::BossDestroyed => BOSS_EXPLOSION_PARTICLES,
        }
    }

    pub fn is_large(self) -> bool {
        !matches!(self, ExplosionKind::Impact)
    }
}

/// A single event produced during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Explosion { pos: Vec2, kind: ExplosionKind },
    /// An enemy was destroyed by gunfire (score already applied)
    EnemyKilled { id: u32, awarded: u64 },
    BossAppeared { id: u32 },
    /// Boss moved to a new phase index (0 = descending)
    BossPhaseChanged { id: u32, phase: u8 },
    BossDefeated { id: u32, bonus: u64 },
    PowerUpChanged { kind: PowerUpKind, active: bool },
    MultiplierChanged(u32),
    /// Score surpassed the stored high score
    HighScore(u64),
    Achievement(AchievementId),
    Paused(bool),
    GameOver { score: u64 },
    /// Per-tick HUD values
    Hud { score: u64, health_percent: u8 },
}
