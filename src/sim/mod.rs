//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, ids ascending)
//! - No rendering, audio or platform dependencies; everything observable
//!   leaves as a [`GameEvent`]

pub mod boss;
pub mod collision;
pub mod events;
pub mod pattern;
pub mod powerup;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use boss::{AttackPattern, BossPhase, BossState};
pub use collision::CollisionReport;
pub use events::{AchievementId, ExplosionKind, GameEvent, SoundEffect};
pub use pattern::{pattern_for, weapon_level};
pub use powerup::{PowerUpKind, PowerUpManager};
pub use scoring::ScoringEngine;
pub use spawn::SpawnDirector;
pub use state::{Bullet, BulletOwner, Enemy, EnemyKind, GamePhase, GameState, Player};
pub use store::{EntityStore, Removals};
pub use tick::{TickInput, tick};
