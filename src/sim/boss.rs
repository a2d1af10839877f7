//! Boss phase controller
//!
//! Phase index 0 is the descent. Indices 1..=3 are engage stages, each
//! selecting one attack from the boss's fixed attack list. The index only
//! moves forward, driven by the boss's remaining health.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::{AchievementId, ExplosionKind, GameEvent};
use super::state::{BulletSpec, Enemy, GameState};
use crate::consts::*;

/// Movement state derived from the phase index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Moving straight down to mid-field; no horizontal movement, no fire
    Descend,
    /// Sweeping left and right while firing the active attack
    Engage,
}

/// Attack identifiers, dispatched through [`attack_table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Five-bullet downward fan
    Spread,
    /// Eight-way ring
    Circle,
    /// Single fast shot aimed at the player
    Homing,
}

/// Boss-only state carried by an [`Enemy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    /// 0 = descending, n >= 1 = engaged with `attacks[n - 1]`
    pub phase_index: u8,
    /// Ticks into the current sweep cycle
    pub phase_timer: u32,
    pub attacks: [AttackPattern; 3],
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            phase_index: 0,
            phase_timer: 0,
            attacks: [
                AttackPattern::Spread,
                AttackPattern::Circle,
                AttackPattern::Homing,
            ],
        }
    }
}

impl BossState {
    pub fn phase(&self) -> BossPhase {
        if self.phase_index == 0 {
            BossPhase::Descend
        } else {
            BossPhase::Engage
        }
    }

    /// The single attack that may fire this tick
    pub fn active_attack(&self) -> Option<AttackPattern> {
        match self.phase_index {
            0 => None,
            n => {
                let idx = (n as usize - 1).min(self.attacks.len() - 1);
                Some(self.attacks[idx])
            }
        }
    }
}

/// Inputs an attack needs; no access to the rest of the world
#[derive(Debug, Clone, Copy)]
pub struct AttackContext {
    pub boss_pos: Vec2,
    pub boss_size: Vec2,
    pub player_pos: Vec2,
}

/// A volley generator plus the cooldown it sets after firing
#[derive(Debug, Clone, Copy)]
pub struct AttackEntry {
    pub cooldown: i32,
    pub fire: fn(&AttackContext) -> Vec<BulletSpec>,
}

/// Fixed dispatch table from attack id to its pure volley function
pub fn attack_table(pattern: AttackPattern) -> AttackEntry {
    match pattern {
        AttackPattern::Spread => AttackEntry {
            cooldown: 30,
            fire: fire_spread,
        },
        AttackPattern::Circle => AttackEntry {
            cooldown: 45,
            fire: fire_circle,
        },
        AttackPattern::Homing => AttackEntry {
            cooldown: 15,
            fire: fire_homing,
        },
    }
}

fn fire_spread(ctx: &AttackContext) -> Vec<BulletSpec> {
    let origin = Vec2::new(
        ctx.boss_pos.x + ctx.boss_size.x / 2.0,
        ctx.boss_pos.y + ctx.boss_size.y,
    );
    (-2..=2)
        .map(|i| BulletSpec {
            pos: origin,
            vel: Vec2::new(i as f32 * 3.0, 5.0),
            size: Vec2::splat(8.0),
        })
        .collect()
}

fn fire_circle(ctx: &AttackContext) -> Vec<BulletSpec> {
    let origin = ctx.boss_pos + ctx.boss_size / 2.0;
    (0..8)
        .map(|i| {
            let angle = i as f32 / 8.0 * std::f32::consts::TAU;
            BulletSpec {
                pos: origin,
                vel: Vec2::from_angle(angle) * 5.0,
                size: Vec2::splat(8.0),
            }
        })
        .collect()
}

fn fire_homing(ctx: &AttackContext) -> Vec<BulletSpec> {
    let origin = ctx.boss_pos + ctx.boss_size / 2.0;
    let delta = ctx.player_pos - origin;
    let angle = delta.y.atan2(delta.x);
    vec![BulletSpec {
        pos: origin,
        vel: Vec2::from_angle(angle) * 8.0,
        size: Vec2::splat(12.0),
    }]
}

/// Engage stage (1..=3) a boss at this health has earned
pub fn stage_for_health(health: i32, max_health: i32) -> u8 {
    // Integer thirds: > 2/3 -> 1, > 1/3 -> 2, else 3
    let scaled = health.max(0) as i64 * 3;
    let max = max_health.max(1) as i64;
    if scaled > max * 2 {
        1
    } else if scaled > max {
        2
    } else {
        3
    }
}

/// Advance every live boss by one tick
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let field = state.field;
    let player_pos = state.entities.player.pos;
    let mut volleys: Vec<(u32, Vec<BulletSpec>)> = Vec::new();

    for enemy in state.entities.enemies.iter_mut() {
        if !enemy.is_alive() {
            continue;
        }
        if let Some(volley) = step_boss(enemy, field, player_pos, events) {
            volleys.push((enemy.id, volley));
        }
    }

    for (id, volley) in volleys {
        for spec in volley {
            state.entities.add_enemy_bullet(id, spec);
        }
    }
}

/// One boss tick: movement, stage advance, at most one volley
fn step_boss(
    enemy: &mut Enemy,
    field: Vec2,
    player_pos: Vec2,
    events: &mut Vec<GameEvent>,
) -> Option<Vec<BulletSpec>> {
    let id = enemy.id;
    let (health, max_health) = (enemy.health, enemy.max_health);
    let boss = enemy.boss.as_mut()?;

    match boss.phase() {
        BossPhase::Descend => {
            if enemy.pos.y < field.y / 2.0 {
                enemy.pos.y += enemy.speed;
            } else {
                boss.phase_index = 1;
                boss.phase_timer = 0;
                log::info!("Boss #{id} engaging");
                events.push(GameEvent::BossPhaseChanged { id, phase: 1 });
            }
            None
        }
        BossPhase::Engage => {
            let earned = stage_for_health(health, max_health);
            if earned > boss.phase_index {
                boss.phase_index = earned;
                log::info!("Boss #{id} entering stage {earned}");
                events.push(GameEvent::BossPhaseChanged { id, phase: earned });
            }

            if boss.phase_timer < BOSS_SWEEP_TICKS {
                enemy.pos.x -= enemy.speed;
            } else if boss.phase_timer < BOSS_SWEEP_TICKS * 2 {
                enemy.pos.x += enemy.speed;
            } else {
                boss.phase_timer = 0;
            }
            boss.phase_timer += 1;

            let mut volley = None;
            if let Some(attack) = boss.active_attack() {
                let entry = attack_table(attack);
                if enemy.shoot_timer <= 0 {
                    let ctx = AttackContext {
                        boss_pos: enemy.pos,
                        boss_size: enemy.size,
                        player_pos,
                    };
                    volley = Some((entry.fire)(&ctx));
                    enemy.shoot_timer = entry.cooldown;
                }
            }
            enemy.shoot_timer -= 1;
            volley
        }
    }
}

/// Side effects of a boss dying: flat bonus, big explosion, achievement
pub fn on_defeated(state: &mut GameState, id: u32, center: Vec2, events: &mut Vec<GameEvent>) {
    state.scoring.add_bonus(BOSS_DEFEAT_BONUS);
    events.push(GameEvent::Explosion {
        pos: center,
        kind: ExplosionKind::BossDestroyed,
    });
    events.push(GameEvent::BossDefeated {
        id,
        bonus: BOSS_DEFEAT_BONUS,
    });
    events.push(GameEvent::Achievement(AchievementId::BossKiller));
    log::info!("Boss #{id} defeated");
}
