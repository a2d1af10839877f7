//! Collision detection and resolution for one tick
//!
//! Order matters so a single bullet is credited at most once:
//! 1. enemy bullets vs player
//! 2. player bullets vs enemies
//! 3. player body vs enemy bodies
//! 4. out-of-bounds cull
//!
//! Every step only records into a shared `Removals` set; the store filters
//! its collections once at the end.

use glam::Vec2;

use super::boss;
use super::events::{AchievementId, ExplosionKind, GameEvent, SoundEffect};
use super::state::{EnemyKind, GamePhase, GameState, Player};
use super::store::{CullReport, Removals};
use crate::consts::*;

/// Summary of what happened during resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Enemy bullets that struck the player (shielded or not)
    pub player_hits: u32,
    /// Player bullets that struck an enemy
    pub enemy_hits: u32,
    /// Enemies destroyed by gunfire, in resolution order
    pub kills: Vec<u32>,
    /// Enemies removed by ramming the player
    pub contacts: Vec<u32>,
    pub culled: CullReport,
}

struct Kill {
    id: u32,
    kind: EnemyKind,
    center: Vec2,
}

fn hurt_player(player: &mut Player, amount: i32, shielded: bool, events: &mut Vec<GameEvent>) {
    if shielded {
        return;
    }
    player.health -= amount;
    events.push(GameEvent::Sound(SoundEffect::PlayerHit));
}

/// Resolve every overlap for this tick
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut removals = Removals::default();
    let mut kills: Vec<Kill> = Vec::new();
    let shielded = state.powerups.shield_active();
    let field = state.field;

    {
        let player = &mut state.entities.player;
        let enemies = &mut state.entities.enemies;
        let player_rect = player.rect();

        // 1. Enemy bullets vs player
        for enemy in enemies.iter() {
            for bullet in &enemy.bullets {
                if bullet.rect().overlaps(&player_rect) && removals.take_bullet(bullet.id) {
                    report.player_hits += 1;
                    hurt_player(player, ENEMY_BULLET_DAMAGE, shielded, events);
                }
            }
        }

        // 2. Player bullets vs enemies
        for enemy in enemies.iter_mut() {
            for bullet in &player.bullets {
                if !enemy.is_alive() {
                    break;
                }
                if removals.has_bullet(bullet.id) || !bullet.rect().overlaps(&enemy.rect()) {
                    continue;
                }
                removals.take_bullet(bullet.id);
                report.enemy_hits += 1;

                let damage = BASE_BULLET_DAMAGE * state.scoring.multiplier() as i32;
                enemy.health -= damage;
                events.push(GameEvent::Explosion {
                    pos: bullet.pos,
                    kind: ExplosionKind::Impact,
                });

                if enemy.is_alive() {
                    events.push(GameEvent::Sound(SoundEffect::EnemyHit));
                } else {
                    let awarded = state.scoring.on_kill(enemy.kind.kill_score());
                    removals.remove_enemy(enemy.id);
                    events.push(GameEvent::Explosion {
                        pos: enemy.rect().center(),
                        kind: ExplosionKind::EnemyDestroyed,
                    });
                    events.push(GameEvent::Sound(SoundEffect::EnemyExplode));
                    events.push(GameEvent::EnemyKilled {
                        id: enemy.id,
                        awarded,
                    });

                    state.kills += 1;
                    if state.kills == 1 {
                        events.push(GameEvent::Achievement(AchievementId::FirstKill));
                    }
                    state.kills_since_miss += 1;
                    if state.kills_since_miss == SHARPSHOOTER_KILLS {
                        events.push(GameEvent::Achievement(AchievementId::Sharpshooter));
                    }
                    kills.push(Kill {
                        id: enemy.id,
                        kind: enemy.kind,
                        center: enemy.rect().center(),
                    });
                }
                state.scoring.on_hit(events);
            }
        }

        // 3. Player body vs enemy bodies; contact always removes the enemy
        let player_rect = player.rect();
        for enemy in enemies.iter() {
            if removals.has_enemy(enemy.id) || !enemy.rect().overlaps(&player_rect) {
                continue;
            }
            removals.remove_enemy(enemy.id);
            hurt_player(player, CONTACT_DAMAGE, shielded, events);
            events.push(GameEvent::Explosion {
                pos: enemy.rect().center(),
                kind: ExplosionKind::Collision,
            });
            report.contacts.push(enemy.id);
        }
    }

    // 4. Out-of-bounds cull
    report.culled = state.entities.collect_out_of_bounds(field, &mut removals);
    if report.culled.player_misses > 0 {
        state.scoring.on_miss();
        state.kills_since_miss = 0;
    }

    state.entities.apply(&removals);

    for kill in kills {
        if kill.kind == EnemyKind::Boss {
            boss::on_defeated(state, kill.id, kill.center, events);
        }
        report.kills.push(kill.id);
    }

    let player = &mut state.entities.player;
    if player.health <= 0 && state.phase != GamePhase::GameOver {
        player.health = 0;
        state.phase = GamePhase::GameOver;
        let score = state.scoring.score();
        log::info!("Game over with score {score}");
        events.push(GameEvent::GameOver { score });
    }

    report
}
