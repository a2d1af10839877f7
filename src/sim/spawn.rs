//! Enemy and boss spawn cadence

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::{ExplosionKind, GameEvent, SoundEffect};
use super::state::{EnemyKind, GameState};
use crate::consts::*;

/// What a spawn check produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    Enemy { id: u32, kind: EnemyKind },
    Boss { id: u32 },
}

/// Countdown to the next spawn plus the rising boss threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Ticks until the next spawn (spawns at <= 0)
    pub countdown: f32,
    /// Score at which the next boss arrives
    boss_spawn_score: u64,
    pub bosses_spawned: u32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            countdown: INITIAL_SPAWN_COUNTDOWN,
            boss_spawn_score: FIRST_BOSS_SCORE,
            bosses_spawned: 0,
        }
    }
}

impl SpawnDirector {
    pub fn boss_spawn_score(&self) -> u64 {
        self.boss_spawn_score
    }
}

/// Interval after a regular spawn: shrinks linearly with score to a floor
pub fn spawn_interval(score: u64) -> f32 {
    let interval = MAX_SPAWN_INTERVAL - (score as f32 / 1000.0) * SPAWN_INTERVAL_DECAY_PER_1000;
    interval.max(MIN_SPAWN_INTERVAL)
}

/// Run the spawn check for this tick.
///
/// When the countdown has expired, either a boss (if the score has reached
/// the threshold) or one regular enemy is created. The countdown then
/// decrements once regardless.
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<Spawned> {
    let mut spawned = None;

    if state.spawner.countdown <= 0.0 {
        let score = state.scoring.score();
        if score >= state.spawner.boss_spawn_score {
            let id = spawn_boss(state, events);
            state.spawner.boss_spawn_score += BOSS_SCORE_STEP;
            state.spawner.bosses_spawned += 1;
            state.spawner.countdown = POST_BOSS_SPAWN_COUNTDOWN;
            spawned = Some(Spawned::Boss { id });
        } else {
            let (id, kind) = spawn_regular(state);
            state.spawner.countdown = spawn_interval(score);
            spawned = Some(Spawned::Enemy { id, kind });
        }
    }
    state.spawner.countdown -= 1.0;

    spawned
}

/// Create one regular enemy of a uniformly random kind above the field
pub fn spawn_regular(state: &mut GameState) -> (u32, EnemyKind) {
    let field = state.field;
    let rng = state.rng();
    let kind = EnemyKind::REGULAR[rng.random_range(0..EnemyKind::REGULAR.len())];
    let size = kind.stats().size;
    let x = rng.random::<f32>() * (field.x - size.x).max(0.0);
    // Stagger shooters so a group never fires in lockstep
    let initial_cooldown = if kind == EnemyKind::Shooter {
        (rng.random::<f32>() * SHOOTER_MAX_INITIAL_COOLDOWN) as i32
    } else {
        0
    };

    let id = state.entities.spawn_enemy(kind, Vec2::new(x, -size.y));
    if let Some(enemy) = state.entities.enemy_mut(id) {
        enemy.shoot_timer = initial_cooldown;
    }
    (id, kind)
}

/// Create a boss and announce it
pub fn spawn_boss(state: &mut GameState, events: &mut Vec<GameEvent>) -> u32 {
    let id = state.entities.spawn_boss(state.field);
    if let Some(boss) = state.entities.enemy(id) {
        events.push(GameEvent::Explosion {
            pos: boss.rect().center(),
            kind: ExplosionKind::BossArrival,
        });
    }
    events.push(GameEvent::Sound(SoundEffect::BossAppear));
    events.push(GameEvent::BossAppeared { id });
    log::info!("Boss #{id} incoming at score {}", state.scoring.score());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_spawn_after_initial_countdown() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        for _ in 0..INITIAL_SPAWN_COUNTDOWN as u32 {
            assert!(update(&mut state, &mut events).is_none());
        }
        assert!(matches!(
            update(&mut state, &mut events),
            Some(Spawned::Enemy { .. })
        ));
        assert_eq!(state.entities.enemies.len(), 1);
        assert_eq!(state.spawner.countdown, MAX_SPAWN_INTERVAL - 1.0);
    }

    #[test]
    fn test_boss_replaces_regular_spawn() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        state.scoring.add_bonus(FIRST_BOSS_SCORE);
        state.spawner.countdown = 0.0;

        let spawned = update(&mut state, &mut events);
        assert!(matches!(spawned, Some(Spawned::Boss { .. })));
        assert_eq!(state.entities.enemies.len(), 1);
        assert!(state.entities.enemies[0].is_boss());
        assert_eq!(state.spawner.boss_spawn_score(), FIRST_BOSS_SCORE + BOSS_SCORE_STEP);
        assert_eq!(state.spawner.countdown, POST_BOSS_SPAWN_COUNTDOWN - 1.0);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::BossAppear)));
    }

    #[test]
    fn test_boss_threshold_steps_by_1000() {
        let mut state = GameState::new(3);
        let mut events = Vec::new();
        state.scoring.add_bonus(5_000);
        let mut last = state.spawner.boss_spawn_score();
        for _ in 0..3 {
            state.spawner.countdown = 0.0;
            update(&mut state, &mut events);
            let next = state.spawner.boss_spawn_score();
            assert_eq!(next, last + BOSS_SCORE_STEP);
            last = next;
        }
        assert_eq!(state.spawner.bosses_spawned, 3);
    }

    #[test]
    fn test_shooter_initial_cooldown_in_range() {
        let mut state = GameState::new(99);
        for _ in 0..200 {
            let (id, kind) = spawn_regular(&mut state);
            let enemy = state.entities.enemy(id).unwrap();
            if kind == EnemyKind::Shooter {
                assert!((0..SHOOTER_MAX_INITIAL_COOLDOWN as i32).contains(&enemy.shoot_timer));
            } else {
                assert_eq!(enemy.shoot_timer, 0);
            }
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x + enemy.size.x <= state.field.x);
            assert_eq!(enemy.pos.y, -enemy.size.y);
        }
    }

    #[test]
    fn test_all_regular_kinds_appear() {
        let mut state = GameState::new(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(spawn_regular(&mut state).1);
        }
        assert_eq!(seen.len(), EnemyKind::REGULAR.len());
        assert!(!seen.contains(&EnemyKind::Boss));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(1234);
        let mut b = GameState::new(1234);
        for _ in 0..20 {
            let (ia, ka) = spawn_regular(&mut a);
            let (ib, kb) = spawn_regular(&mut b);
            assert_eq!((ia, ka), (ib, kb));
            assert_eq!(a.entities.enemy(ia).unwrap().pos, b.entities.enemy(ib).unwrap().pos);
        }
    }

    proptest! {
        #[test]
        fn prop_spawn_interval_bounded(score in 0u64..10_000_000) {
            let interval = spawn_interval(score);
            prop_assert!(interval >= MIN_SPAWN_INTERVAL);
            prop_assert!(interval <= MAX_SPAWN_INTERVAL);
            prop_assert!(spawn_interval(score + 100) <= interval);
        }
    }
}
