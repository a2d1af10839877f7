//! Timed and instantaneous power-ups

use serde::{Deserialize, Serialize};

use super::events::{ExplosionKind, GameEvent, SoundEffect};
use super::state::GameState;
use crate::consts::POWER_UP_DURATION;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Blocks all damage while active
    Shield,
    /// Shortens the player's shoot cooldown while active
    Rapid,
    /// Clears the screen instantly
    Bomb,
}

impl PowerUpKind {
    /// Map a 1-based selection slot to a power-up
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(PowerUpKind::Shield),
            2 => Some(PowerUpKind::Rapid),
            3 => Some(PowerUpKind::Bomb),
            _ => None,
        }
    }

    /// Ticks an activation lasts (0 = instantaneous)
    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Shield | PowerUpKind::Rapid => POWER_UP_DURATION,
            PowerUpKind::Bomb => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Rapid => "rapid",
            PowerUpKind::Bomb => "bomb",
        }
    }

    fn sound(self) -> SoundEffect {
        match self {
            PowerUpKind::Shield => SoundEffect::ShieldActivate,
            PowerUpKind::Rapid => SoundEffect::RapidFireActivate,
            PowerUpKind::Bomb => SoundEffect::BombActivate,
        }
    }
}

/// One timer slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub active: bool,
    pub remaining: u32,
}

impl PowerUp {
    fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            active: false,
            remaining: 0,
        }
    }
}

/// Shield, rapid-fire and bomb slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpManager {
    shield: PowerUp,
    rapid: PowerUp,
    bomb: PowerUp,
}

impl Default for PowerUpManager {
    fn default() -> Self {
        Self {
            shield: PowerUp::new(PowerUpKind::Shield),
            rapid: PowerUp::new(PowerUpKind::Rapid),
            bomb: PowerUp::new(PowerUpKind::Bomb),
        }
    }
}

impl PowerUpManager {
    pub fn slot(&self, kind: PowerUpKind) -> &PowerUp {
        match kind {
            PowerUpKind::Shield => &self.shield,
            PowerUpKind::Rapid => &self.rapid,
            PowerUpKind::Bomb => &self.bomb,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut PowerUp {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Rapid => &mut self.rapid,
            PowerUpKind::Bomb => &mut self.bomb,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).active
    }

    pub fn shield_active(&self) -> bool {
        self.shield.active
    }

    pub fn rapid_active(&self) -> bool {
        self.rapid.active
    }

    /// Arm a timed slot. Re-arming an active slot only resets its timer.
    ///
    /// Bomb never holds an active state; use [`activate`] to detonate it.
    pub fn arm(&mut self, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
        let duration = kind.duration();
        if duration == 0 {
            return;
        }
        let slot = self.slot_mut(kind);
        let was_active = slot.active;
        slot.active = true;
        slot.remaining = duration;
        if !was_active {
            events.push(GameEvent::PowerUpChanged { kind, active: true });
        }
    }

    /// Count down timed slots, deactivating any that expire
    pub fn tick(&mut self, events: &mut Vec<GameEvent>) {
        for slot in [&mut self.shield, &mut self.rapid] {
            if !slot.active {
                continue;
            }
            slot.remaining = slot.remaining.saturating_sub(1);
            if slot.remaining == 0 {
                slot.active = false;
                log::debug!("{} expired", slot.kind.name());
                events.push(GameEvent::PowerUpChanged {
                    kind: slot.kind,
                    active: false,
                });
            }
        }
    }
}

/// Activate a power-up against the session.
///
/// Shield and rapid arm their timers. Bomb destroys every live enemy at once,
/// emitting an explosion for each but awarding no score.
pub fn activate(state: &mut GameState, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::Sound(kind.sound()));
    match kind {
        PowerUpKind::Shield | PowerUpKind::Rapid => {
            state.powerups.arm(kind, events);
            log::debug!("{} armed for {} ticks", kind.name(), kind.duration());
        }
        PowerUpKind::Bomb => {
            let cleared = state.entities.clear_enemies();
            log::debug!("bomb cleared {} enemies", cleared.len());
            for enemy in &cleared {
                events.push(GameEvent::Explosion {
                    pos: enemy.rect().center(),
                    kind: ExplosionKind::Bomb,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;
    use glam::Vec2;

    #[test]
    fn test_arm_and_expire() {
        let mut powerups = PowerUpManager::default();
        let mut events = Vec::new();
        powerups.arm(PowerUpKind::Shield, &mut events);
        assert!(powerups.shield_active());
        assert_eq!(powerups.slot(PowerUpKind::Shield).remaining, POWER_UP_DURATION);

        for _ in 0..POWER_UP_DURATION - 1 {
            powerups.tick(&mut events);
        }
        assert!(powerups.shield_active());
        powerups.tick(&mut events);
        assert!(!powerups.shield_active());
        assert_eq!(
            events.last(),
            Some(&GameEvent::PowerUpChanged {
                kind: PowerUpKind::Shield,
                active: false
            })
        );
    }

    #[test]
    fn test_rearm_resets_timer_without_stacking() {
        let mut powerups = PowerUpManager::default();
        let mut events = Vec::new();
        powerups.arm(PowerUpKind::Rapid, &mut events);
        for _ in 0..100 {
            powerups.tick(&mut events);
        }
        powerups.arm(PowerUpKind::Rapid, &mut events);
        let slot = powerups.slot(PowerUpKind::Rapid);
        assert!(slot.active);
        assert_eq!(slot.remaining, POWER_UP_DURATION);
        let activations = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PowerUpChanged { active: true, .. }))
            .count();
        assert_eq!(activations, 1);
    }

    #[test]
    fn test_slots_independent() {
        let mut powerups = PowerUpManager::default();
        let mut events = Vec::new();
        powerups.arm(PowerUpKind::Shield, &mut events);
        assert!(!powerups.rapid_active());
        assert!(!powerups.is_active(PowerUpKind::Bomb));
    }

    #[test]
    fn test_bomb_clears_without_score() {
        let mut state = GameState::new(7);
        for i in 0..4 {
            state
                .entities
                .spawn_enemy(EnemyKind::Normal, Vec2::new(50.0 * i as f32, 50.0));
        }
        let mut events = Vec::new();
        activate(&mut state, PowerUpKind::Bomb, &mut events);

        assert!(state.entities.enemies.is_empty());
        assert_eq!(state.scoring.score(), 0);
        assert!(!state.powerups.is_active(PowerUpKind::Bomb));
        let explosions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { kind: ExplosionKind::Bomb, .. }))
            .count();
        assert_eq!(explosions, 4);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::BombActivate)));
    }

    #[test]
    fn test_from_slot() {
        assert_eq!(PowerUpKind::from_slot(1), Some(PowerUpKind::Shield));
        assert_eq!(PowerUpKind::from_slot(3), Some(PowerUpKind::Bomb));
        assert_eq!(PowerUpKind::from_slot(4), None);
    }
}
