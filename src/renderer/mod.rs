//! Render collaborator
//!
//! The simulation never draws. After each frame the session copies what a
//! renderer needs into a [`RenderSnapshot`] and hands it to a [`RenderSink`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{
    BulletOwner, EnemyKind, ExplosionKind, GameEvent, GamePhase, GameState, PowerUpKind,
};

/// One drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySprite {
    pub id: u32,
    pub kind: EnemyKind,
    pub sprite: Sprite,
    /// Fraction of health left; `None` when the kind draws no bar
    pub health_bar: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSprite {
    pub sprite: Sprite,
    pub from_player: bool,
}

/// Explosion to spawn particles for this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub pos: Vec2,
    pub particles: u32,
    pub large: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub field: Vec2,
    pub player: Sprite,
    pub shield: bool,
    pub rapid: bool,
    pub enemies: Vec<EnemySprite>,
    pub bullets: Vec<BulletSprite>,
    pub bursts: Vec<Burst>,
    pub score: u64,
    pub high_score: u64,
    pub multiplier: u32,
    pub weapon_level: u32,
}

impl RenderSnapshot {
    /// Copy the drawable state plus this frame's explosions
    pub fn build(state: &GameState, events: &[GameEvent]) -> Self {
        let player = &state.entities.player;

        let enemies = state
            .entities
            .enemies
            .iter()
            .map(|e| EnemySprite {
                id: e.id,
                kind: e.kind,
                sprite: Sprite {
                    pos: e.pos,
                    size: e.size,
                },
                health_bar: e.kind.shows_health_bar().then(|| e.health_fraction()),
            })
            .collect();

        let bullets = player
            .bullets
            .iter()
            .chain(state.entities.enemies.iter().flat_map(|e| e.bullets.iter()))
            .map(|b| BulletSprite {
                sprite: Sprite {
                    pos: b.pos,
                    size: b.size,
                },
                from_player: b.owner == BulletOwner::Player,
            })
            .collect();

        let bursts = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Explosion { pos, kind } => Some(burst(*pos, *kind)),
                _ => None,
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            field: state.field,
            player: Sprite {
                pos: player.pos,
                size: player.size,
            },
            shield: state.powerups.is_active(PowerUpKind::Shield),
            rapid: state.powerups.is_active(PowerUpKind::Rapid),
            enemies,
            bullets,
            bursts,
            score: state.scoring.score(),
            high_score: state.scoring.high_score(),
            multiplier: state.scoring.multiplier(),
            weapon_level: state.weapon_level(),
        }
    }
}

fn burst(pos: Vec2, kind: ExplosionKind) -> Burst {
    Burst {
        pos,
        particles: kind.particles(),
        large: kind.is_large(),
    }
}

/// Consumer of per-frame snapshots
pub trait RenderSink {
    fn present(&mut self, snapshot: &RenderSnapshot);
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn present(&mut self, _snapshot: &RenderSnapshot) {}
}

/// Keeps the most recent snapshot around
#[derive(Debug, Default)]
pub struct LastFrame {
    pub frame: Option<RenderSnapshot>,
}

impl RenderSink for LastFrame {
    fn present(&mut self, snapshot: &RenderSnapshot) {
        self.frame = Some(snapshot.clone());
    }
}
