//! Fixed per-frame simulation tick
//!
//! Core game loop that advances the session deterministically.

use glam::Vec2;

use super::boss;
use super::collision;
use super::events::{GameEvent, SoundEffect};
use super::pattern::pattern_for;
use super::powerup::{self, PowerUpKind};
use super::spawn::{self, Spawned};
use super::state::{BulletSpec, EnemyKind, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Power-up selected this tick (one-shot)
    pub activate: Option<PowerUpKind>,
}

/// Advance the game state by one tick, appending everything that happened to `events`
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused(true));
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Paused(false));
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    if let Some(kind) = input.activate {
        powerup::activate(state, kind, events);
    }
    update_player(state, input, events);
    if let Some(Spawned::Enemy { id, kind }) = spawn::update(state, events) {
        log::debug!("spawned {kind:?} #{id}");
    }
    advance_enemies(state);
    let report = collision::resolve(state, events);
    if !report.kills.is_empty() || !report.contacts.is_empty() {
        log::debug!(
            "tick {}: killed {:?}, rammed {:?}",
            state.time_ticks,
            report.kills,
            report.contacts
        );
    }
    boss::update(state, events);
    state.powerups.tick(events);
    state.scoring.tick(events);

    events.push(GameEvent::Hud {
        score: state.scoring.score(),
        health_percent: state.entities.player.health_percent(),
    });
}

/// Move the player, fire if allowed, advance player bullets
fn update_player(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let field = state.field;
    let rapid = state.powerups.rapid_active();
    let level = state.weapon_level();
    let player = &mut state.entities.player;

    let speed = player.speed;
    if input.left && player.pos.x > 0.0 {
        player.pos.x -= speed;
    }
    if input.right && player.pos.x < field.x - player.size.x {
        player.pos.x += speed;
    }
    if input.up && player.pos.y > 0.0 {
        player.pos.y -= speed;
    }
    if input.down && player.pos.y < field.y - player.size.y {
        player.pos.y += speed;
    }

    let fire = input.fire && player.shoot_timer <= 0;
    let muzzle = Vec2::new(
        player.pos.x + player.size.x / 2.0 - PLAYER_BULLET_WIDTH / 2.0,
        player.pos.y,
    );
    if fire {
        player.shoot_timer = if rapid {
            RAPID_SHOOT_COOLDOWN
        } else {
            SHOOT_COOLDOWN
        };
    }
    player.shoot_timer -= 1;

    if fire {
        for offset in pattern_for(level) {
            state.entities.add_player_bullet(BulletSpec {
                pos: muzzle,
                vel: *offset * PLAYER_BULLET_SPEED,
                size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            });
        }
        events.push(GameEvent::Sound(if level > 1 {
            SoundEffect::AltShoot
        } else {
            SoundEffect::Shoot
        }));
    }

    // Fresh shots move on the tick they are fired
    for bullet in &mut state.entities.player.bullets {
        bullet.pos += bullet.vel;
    }
}

/// Regular enemy movement, shooter fire, and every enemy bullet's motion.
/// Bosses move in their own controller.
fn advance_enemies(state: &mut GameState) {
    let target = state.entities.player.pos;
    let mut shots: Vec<(u32, BulletSpec)> = Vec::new();

    for enemy in state.entities.enemies.iter_mut() {
        for bullet in &mut enemy.bullets {
            bullet.pos += bullet.vel;
        }
        if enemy.kind == EnemyKind::Boss {
            continue;
        }

        enemy.pos.y += enemy.speed;

        if enemy.kind == EnemyKind::Shooter {
            if enemy.shoot_timer <= 0 {
                let delta = target - enemy.pos;
                let angle = delta.y.atan2(delta.x);
                shots.push((
                    enemy.id,
                    BulletSpec {
                        pos: Vec2::new(
                            enemy.pos.x + enemy.size.x / 2.0,
                            enemy.pos.y + enemy.size.y,
                        ),
                        vel: Vec2::from_angle(angle) * ENEMY_BULLET_SPEED,
                        size: Vec2::splat(ENEMY_BULLET_SIZE),
                    },
                ));
                enemy.shoot_timer = SHOOTER_COOLDOWN;
            }
            enemy.shoot_timer -= 1;
        }
    }

    for (id, spec) in shots {
        state.entities.add_enemy_bullet(id, spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::BossPhase;
    use proptest::prelude::*;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn shots_fired(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Sound(SoundEffect::Shoot) | GameEvent::Sound(SoundEffect::AltShoot)
                )
            })
            .count()
    }

    #[test]
    fn test_tick_advances_time() {
        let mut state = GameState::new(42);
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.time_ticks, 1);
        assert!(matches!(events.last(), Some(GameEvent::Hud { .. })));
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut state = GameState::new(42);
        let mut events = Vec::new();
        for _ in 0..10 {
            tick(&mut state, &fire(), &mut events);
        }
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &mut events);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(events.last(), Some(&GameEvent::Paused(true)));

        let ticks = state.time_ticks;
        let pos = state.entities.player.pos;
        let bullets = state.entities.bullet_count();
        events.clear();
        for _ in 0..50 {
            tick(&mut state, &fire(), &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.entities.player.pos, pos);
        assert_eq!(state.entities.bullet_count(), bullets);

        tick(&mut state, &pause, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_fire_cadence_normal() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        for _ in 0..30 {
            tick(&mut state, &fire(), &mut events);
        }
        // ticks 1 and 16
        assert_eq!(shots_fired(&events), 2);
    }

    #[test]
    fn test_rapid_fire_cadence() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        let first = TickInput {
            fire: true,
            activate: Some(PowerUpKind::Rapid),
            ..Default::default()
        };
        tick(&mut state, &first, &mut events);
        for _ in 1..30 {
            tick(&mut state, &fire(), &mut events);
        }
        // ticks 1, 6, 11, 16, 21, 26
        assert_eq!(shots_fired(&events), 6);
    }

    #[test]
    fn test_bomb_clears_four_enemies_in_one_tick() {
        let mut state = GameState::new(9);
        for i in 0..4 {
            state
                .entities
                .spawn_enemy(EnemyKind::Normal, Vec2::new(100.0 * i as f32 + 10.0, 50.0));
        }
        let mut events = Vec::new();
        let bomb = TickInput {
            activate: Some(PowerUpKind::Bomb),
            ..Default::default()
        };
        tick(&mut state, &bomb, &mut events);

        assert!(state.entities.enemies.is_empty());
        assert_eq!(state.scoring.score(), 0);
        let explosions = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Explosion {
                        kind: crate::sim::events::ExplosionKind::Bomb,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(explosions, 4);
    }

    #[test]
    fn test_boss_descends_without_sweeping_or_firing() {
        let mut state = GameState::new(5);
        let mut events = Vec::new();
        state.scoring.add_bonus(FIRST_BOSS_SCORE);
        state.spawner.countdown = 0.0;
        tick(&mut state, &TickInput::default(), &mut events);

        let boss_id = state
            .entities
            .enemies
            .iter()
            .find(|e| e.is_boss())
            .map(|e| e.id)
            .unwrap();
        let start_x = state.entities.enemy(boss_id).unwrap().pos.x;

        let mut last_y = f32::MIN;
        let mut engaged = false;
        for _ in 0..400 {
            let boss = state.entities.enemy(boss_id).unwrap();
            if boss.boss.as_ref().unwrap().phase() == BossPhase::Engage {
                engaged = true;
                break;
            }
            assert_eq!(boss.pos.x, start_x);
            assert!(boss.pos.y > last_y);
            assert!(boss.bullets.is_empty());
            last_y = boss.pos.y;
            state.entities.player.health = PLAYER_MAX_HEALTH;
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert!(engaged);
        assert!(state.entities.enemy(boss_id).unwrap().pos.y >= state.field.y / 2.0);

        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert!(!state.entities.enemy(boss_id).unwrap().bullets.is_empty());
    }

    #[test]
    fn test_shooter_fires_aimed_shot_every_cooldown() {
        let mut state = GameState::new(8);
        state.spawner.countdown = 1.0e6;
        let shooter = state
            .entities
            .spawn_enemy(EnemyKind::Shooter, Vec2::new(100.0, 0.0));
        let target = state.entities.player.pos;
        let mut events = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut fired_at = Vec::new();

        for t in 0..250 {
            tick(&mut state, &TickInput::default(), &mut events);
            let enemy = state.entities.enemy(shooter).unwrap();
            for bullet in &enemy.bullets {
                if !seen.insert(bullet.id) {
                    continue;
                }
                fired_at.push(t);
                assert_eq!(bullet.size, Vec2::splat(ENEMY_BULLET_SIZE));
                assert!((bullet.vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);
                let aim = (target - enemy.pos).normalize();
                assert!(bullet.vel.normalize().dot(aim) > 0.999);
            }
        }

        assert_eq!(fired_at, vec![0, 120, 240]);
    }

    #[test]
    fn test_game_over_stops_ticks() {
        let mut state = GameState::new(3);
        state.entities.player.health = 1;
        let pos = state.entities.player.pos;
        state.entities.spawn_enemy(EnemyKind::Tank, pos);
        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);
        assert!(state.is_over());
        assert_eq!(state.entities.player.health, 0);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        let ticks = state.time_ticks;
        events.clear();
        for _ in 0..20 {
            tick(&mut state, &fire(), &mut events);
        }
        assert_eq!(state.time_ticks, ticks);
        assert!(events.is_empty());
    }

    #[test]
    fn test_weapon_level_widens_volley() {
        let mut state = GameState::new(4);
        state.scoring.add_bonus(2 * WEAPON_LEVEL_SCORE_STEP);
        let mut events = Vec::new();
        tick(&mut state, &fire(), &mut events);
        assert_eq!(state.weapon_level(), 3);
        assert_eq!(state.entities.player.bullets.len(), 3);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::AltShoot)));
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut state = GameState::new(4);
        let left = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..200 {
            tick(&mut state, &left, &mut events);
            state.entities.player.health = PLAYER_MAX_HEALTH;
            state.phase = GamePhase::Playing;
        }
        let player = &state.entities.player;
        assert!(player.pos.x > -PLAYER_SPEED && player.pos.x <= 0.0);
        assert!(player.pos.y > -PLAYER_SPEED && player.pos.y <= 0.0);
    }

    #[test]
    fn test_same_seed_same_session() {
        let script = |t: u32| TickInput {
            left: t % 90 < 45,
            right: t % 90 >= 45,
            fire: true,
            activate: (t == 400).then_some(PowerUpKind::Shield),
            ..Default::default()
        };
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        let (mut ea, mut eb) = (Vec::new(), Vec::new());
        for t in 0..1200 {
            tick(&mut a, &script(t), &mut ea);
            tick(&mut b, &script(t), &mut eb);
        }
        assert_eq!(ea, eb);
        assert_eq!(a.scoring.score(), b.scoring.score());
        assert_eq!(a.entities.enemies.len(), b.entities.enemies.len());
    }

    fn input_from_bits(bits: u8) -> TickInput {
        TickInput {
            left: bits & 1 != 0,
            right: bits & 2 != 0,
            up: bits & 4 != 0,
            down: bits & 8 != 0,
            fire: bits & 16 != 0,
            pause: false,
            activate: match bits >> 5 {
                1 => Some(PowerUpKind::Shield),
                2 => Some(PowerUpKind::Rapid),
                3 if bits & 1 == 0 => Some(PowerUpKind::Bomb),
                _ => None,
            },
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_no_dead_entity_survives_a_tick(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any::<u8>(), 1..400),
        ) {
            let mut state = GameState::new(seed);
            let mut events = Vec::new();
            let mut last_score = 0;
            for bits in inputs {
                tick(&mut state, &input_from_bits(bits), &mut events);
                for enemy in &state.entities.enemies {
                    prop_assert!(enemy.health > 0);
                }
                let health = state.entities.player.health;
                prop_assert!((0..=PLAYER_MAX_HEALTH).contains(&health));
                prop_assert!(state.scoring.score() >= last_score);
                last_score = state.scoring.score();
                prop_assert!(state.scoring.multiplier() >= 1);
            }
        }
    }
}
