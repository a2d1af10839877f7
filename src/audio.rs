//! Audio collaborator
//!
//! The simulation only names sounds; an [`AudioBackend`] makes noise. Every
//! backend failure is logged and swallowed here so it can never reach a tick.

use std::fmt;

use crate::sim::SoundEffect;

/// Track name used for the looping background music
pub const MUSIC_TRACK: &str = "music";

/// Backend playback failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device or context could be created
    Unavailable,
    /// The backend refused a specific sound
    Playback { name: String, reason: String },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::Playback { name, reason } => write!(f, "failed to play {name}: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Something that can actually play named sounds
pub trait AudioBackend {
    fn play(&mut self, name: &str, volume: f32, looped: bool) -> Result<(), AudioError>;
    fn stop(&mut self, name: &str) -> Result<(), AudioError>;

    /// Adjust a sound that is already playing
    fn set_volume(&mut self, _name: &str, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Silent backend
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _name: &str, _volume: f32, _looped: bool) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self, _name: &str) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Backend that only traces what would have played
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, name: &str, volume: f32, looped: bool) -> Result<(), AudioError> {
        log::trace!("play {name} vol={volume:.2} loop={looped}");
        Ok(())
    }

    fn stop(&mut self, name: &str) -> Result<(), AudioError> {
        log::trace!("stop {name}");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 0.5,
            music_volume: 0.3,
            muted: false,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_music_volume();
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect.name(), vol, false) {
            log::warn!("{e}");
        }
    }

    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        let vol = self.effective(self.music_volume);
        match self.backend.play(MUSIC_TRACK, vol, true) {
            Ok(()) => self.music_playing = true,
            Err(e) => log::warn!("music disabled: {e}"),
        }
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        if let Err(e) = self.backend.stop(MUSIC_TRACK) {
            log::warn!("{e}");
        }
    }

    fn refresh_music_volume(&mut self) {
        if !self.music_playing {
            return;
        }
        let vol = self.effective(self.music_volume);
        if let Err(e) = self.backend.set_volume(MUSIC_TRACK, vol) {
            log::warn!("{e}");
        }
    }
}
