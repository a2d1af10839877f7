//! Entity ownership and removal
//!
//! The store owns the player, the enemies and (through them) every bullet.
//! Removal is two-phase: systems record what should go into a `Removals`
//! set while they inspect the world, then `apply` filters each collection
//! exactly once. A bullet can therefore never be consumed twice in a tick.

use std::collections::HashSet;

use glam::Vec2;

use super::state::{Bullet, BulletOwner, BulletSpec, Enemy, EnemyKind, Player};

/// Pending removals for one tick
#[derive(Debug, Clone, Default)]
pub struct Removals {
    pub bullets: HashSet<u32>,
    pub enemies: HashSet<u32>,
}

impl Removals {
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.enemies.is_empty()
    }

    /// Marks a bullet, returning false if it was already marked
    pub fn take_bullet(&mut self, id: u32) -> bool {
        self.bullets.insert(id)
    }

    pub fn remove_enemy(&mut self, id: u32) -> bool {
        self.enemies.insert(id)
    }

    pub fn has_bullet(&self, id: u32) -> bool {
        self.bullets.contains(&id)
    }

    pub fn has_enemy(&self, id: u32) -> bool {
        self.enemies.contains(&id)
    }
}

/// What an out-of-bounds pass found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullReport {
    /// Player bullets that left the field without hitting anything
    pub player_misses: u32,
    pub enemy_bullets: u32,
    pub enemies: u32,
}

/// Live collections for one session
#[derive(Debug, Clone)]
pub struct EntityStore {
    pub player: Player,
    /// Spawn order
    pub enemies: Vec<Enemy>,
    next_id: u32,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an enemy of `kind` at `pos`, returning its id
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos));
        id
    }

    /// Insert a boss centred horizontally just above the field
    pub fn spawn_boss(&mut self, field: Vec2) -> u32 {
        let size = EnemyKind::Boss.stats().size;
        let pos = Vec2::new(field.x / 2.0 - size.x / 2.0, -size.y);
        self.spawn_enemy(EnemyKind::Boss, pos)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Remove one enemy immediately (its bullets go with it)
    pub fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    /// Remove every enemy, returning them in spawn order
    pub fn clear_enemies(&mut self) -> Vec<Enemy> {
        std::mem::take(&mut self.enemies)
    }

    pub fn add_player_bullet(&mut self, spec: BulletSpec) -> u32 {
        let id = self.next_entity_id();
        self.player.bullets.push(Bullet {
            id,
            pos: spec.pos,
            vel: spec.vel,
            size: spec.size,
            owner: BulletOwner::Player,
        });
        id
    }

    /// Attach a bullet to `enemy`. Returns None if no such enemy is alive.
    pub fn add_enemy_bullet(&mut self, enemy: u32, spec: BulletSpec) -> Option<u32> {
        let id = self.next_entity_id();
        let owner = self.enemy_mut(enemy)?;
        owner.bullets.push(Bullet {
            id,
            pos: spec.pos,
            vel: spec.vel,
            size: spec.size,
            owner: BulletOwner::Enemy(enemy),
        });
        Some(id)
    }

    /// Number of bullets currently in flight, both sides
    pub fn bullet_count(&self) -> usize {
        self.player.bullets.len() + self.enemies.iter().map(|e| e.bullets.len()).sum::<usize>()
    }

    /// Mark everything that has left the play field
    ///
    /// Bullets go once they are no longer strictly inside the field; enemies
    /// once they have fully passed the bottom edge.
    pub fn collect_out_of_bounds(&self, field: Vec2, removals: &mut Removals) -> CullReport {
        let mut report = CullReport::default();

        for bullet in &self.player.bullets {
            if !bullet.in_bounds(field) && removals.take_bullet(bullet.id) {
                report.player_misses += 1;
            }
        }

        for enemy in &self.enemies {
            for bullet in &enemy.bullets {
                if !bullet.in_bounds(field) && removals.take_bullet(bullet.id) {
                    report.enemy_bullets += 1;
                }
            }
            if enemy.pos.y >= field.y + enemy.size.y && removals.remove_enemy(enemy.id) {
                report.enemies += 1;
            }
        }

        report
    }

    /// Apply a removal set: one filtering pass per collection
    pub fn apply(&mut self, removals: &Removals) {
        if removals.is_empty() {
            return;
        }
        self.player
            .bullets
            .retain(|b| !removals.bullets.contains(&b.id));
        self.enemies.retain(|e| !removals.enemies.contains(&e.id));
        for enemy in &mut self.enemies {
            enemy.bullets.retain(|b| !removals.bullets.contains(&b.id));
        }
    }

    /// Drop everything outside the field right now
    pub fn cull_out_of_bounds(&mut self, field: Vec2) -> CullReport {
        let mut removals = Removals::default();
        let report = self.collect_out_of_bounds(field, &mut removals);
        self.apply(&removals);
        report
    }
}
