//! Platform abstraction layer
//!
//! Turns raw key names from whatever host is running the game into logical
//! keys, and samples them once per tick into a [`TickInput`]. Unknown keys
//! are ignored.

use std::collections::HashSet;

use crate::sim::{PowerUpKind, TickInput};

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
    /// Power-up selection slot (1-based)
    PowerUp(u8),
}

impl Key {
    /// Map a host key name (DOM `KeyboardEvent.key` style) to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "ArrowLeft" | "a" | "A" => Key::Left,
            "ArrowRight" | "d" | "D" => Key::Right,
            "ArrowUp" | "w" | "W" => Key::Up,
            "ArrowDown" | "s" | "S" => Key::Down,
            " " | "Space" | "Spacebar" => Key::Fire,
            "p" | "P" | "Escape" => Key::Pause,
            "1" => Key::PowerUp(1),
            "2" => Key::PowerUp(2),
            "3" => Key::PowerUp(3),
            _ => return None,
        };
        Some(key)
    }

    /// Keys that act once per press rather than while held
    pub fn is_one_shot(self) -> bool {
        matches!(self, Key::Pause | Key::PowerUp(_))
    }

    fn power_up(self) -> Option<PowerUpKind> {
        match self {
            Key::PowerUp(slot) => PowerUpKind::from_slot(slot),
            _ => None,
        }
    }
}

/// Currently held keys plus presses latched since the last sample
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pause_pressed: bool,
    /// Last power-up key pressed since the previous sample
    power_up: Option<PowerUpKind>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns `false` for unrecognized keys.
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };
        // Auto-repeat must not retrigger one-shot keys
        let fresh = self.held.insert(key);
        if fresh && key.is_one_shot() {
            if key == Key::Pause {
                self.pause_pressed = true;
            } else if let Some(kind) = key.power_up() {
                self.power_up = Some(kind);
            }
        }
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.held.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sample for one tick, consuming the one-shot presses
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            fire: self.is_held(Key::Fire),
            pause: std::mem::take(&mut self.pause_pressed),
            activate: self.power_up.take(),
        }
    }
}
