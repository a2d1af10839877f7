//! Scripted player used by the headless demo
//!
//! Tracks the nearest enemy horizontally with fire held, bombs crowded
//! screens and raises the shield when an enemy bullet gets close.

use crate::sim::{GameState, PowerUpKind, TickInput};

/// Live enemies that trigger a bomb
pub const BOMB_CROWD: usize = 6;
/// Minimum ticks between bombs
pub const BOMB_COOLDOWN: u64 = 180;
/// Enemy bullet distance that raises the shield
pub const SHIELD_RADIUS: f32 = 80.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last_bomb: Option<u64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's input from the current state
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let player = &state.entities.player;
        let center = player.rect().center();
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };

        let nearest = state
            .entities
            .enemies
            .iter()
            .map(|e| e.rect().center())
            .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));
        if let Some(target) = nearest {
            let dx = target.x - center.x;
            input.left = dx < -player.speed;
            input.right = dx > player.speed;
        }

        let bomb_ready = self
            .last_bomb
            .is_none_or(|t| state.time_ticks >= t + BOMB_COOLDOWN);
        if state.entities.enemies.len() >= BOMB_CROWD && bomb_ready {
            self.last_bomb = Some(state.time_ticks);
            input.activate = Some(PowerUpKind::Bomb);
        } else if !state.powerups.shield_active() && incoming(state, center) {
            input.activate = Some(PowerUpKind::Shield);
        }

        input
    }
}

fn incoming(state: &GameState, center: glam::Vec2) -> bool {
    state
        .entities
        .enemies
        .iter()
        .flat_map(|e| e.bullets.iter())
        .any(|b| b.rect().center().distance(center) < SHIELD_RADIUS)
}
