//! One play session
//!
//! Owns the [`GameState`] and the collaborators it reports to. Each frame
//! samples input, runs exactly one tick, then dispatches that tick's events.
//! Collaborator failures are logged and never reach the simulation.

use glam::Vec2;

use crate::achievements::AchievementBoard;
use crate::audio::AudioManager;
use crate::highscores::{HighScoreStore, MemoryHighScore};
use crate::platform::InputState;
use crate::renderer::{NullRenderer, RenderSink, RenderSnapshot};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, ScoringEngine, SoundEffect, TickInput, tick};
use crate::ui::{HudState, UiSink};

/// External systems a session reports to
pub struct Collaborators {
    pub audio: AudioManager,
    pub ui: Box<dyn UiSink>,
    pub renderer: Box<dyn RenderSink>,
    pub high_scores: Box<dyn HighScoreStore>,
    pub achievements: AchievementBoard,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            audio: AudioManager::default(),
            ui: Box::new(HudState::default()),
            renderer: Box::new(NullRenderer),
            high_scores: Box::new(MemoryHighScore::default()),
            achievements: AchievementBoard::new(),
        }
    }
}

pub struct Session {
    settings: Settings,
    state: GameState,
    /// Host writes key presses here between frames
    pub input: InputState,
    collab: Collaborators,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: Settings, mut collab: Collaborators) -> Self {
        let settings = settings.sanitized();
        collab.audio.set_master_volume(settings.master_volume);
        collab.audio.set_sfx_volume(settings.sfx_volume);
        collab.audio.set_music_volume(settings.music_volume);
        collab.audio.set_muted(settings.muted);

        let state = new_state(&settings, collab.high_scores.high_score());
        log::info!(
            "Session started: seed={} field={}x{} high score {}",
            state.seed,
            state.field.x,
            state.field.y,
            state.scoring.high_score()
        );
        collab.audio.start_music();

        Self {
            settings,
            state,
            input: InputState::new(),
            collab,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Sample the input feed and advance one frame
    pub fn frame(&mut self) -> &[GameEvent] {
        let input = self.input.take_tick_input();
        self.step(&input)
    }

    /// Advance one frame with explicit input; returns this frame's events
    pub fn step(&mut self, input: &TickInput) -> &[GameEvent] {
        self.events.clear();
        tick(&mut self.state, input, &mut self.events);

        for event in &self.events {
            dispatch(&mut self.collab, event);
        }
        let snapshot = RenderSnapshot::build(&self.state, &self.events);
        self.collab.renderer.present(&snapshot);

        &self.events
    }

    /// Current drawable state, without this frame's bursts
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::build(&self.state, &[])
    }

    /// Throw away the current game and start fresh; the high score carries over
    pub fn restart(&mut self) {
        let best = self
            .collab
            .high_scores
            .high_score()
            .max(self.state.scoring.high_score());
        self.state = new_state(&self.settings, best);
        self.input.clear();
        self.events.clear();
        log::info!("Session restarted: seed={}", self.state.seed);
        self.collab.audio.start_music();
    }
}

fn new_state(settings: &Settings, high_score: u64) -> GameState {
    let seed = settings.seed.unwrap_or_else(rand::random);
    let field = Vec2::new(settings.field_width, settings.field_height);
    let mut state = GameState::with_field(seed, field);
    state.scoring = ScoringEngine::with_high_score(high_score);
    state
}

fn dispatch(collab: &mut Collaborators, event: &GameEvent) {
    match event {
        GameEvent::Sound(effect) => collab.audio.play(*effect),
        GameEvent::Hud {
            score,
            health_percent,
        } => {
            collab.ui.score(*score);
            collab.ui.health(*health_percent);
        }
        GameEvent::PowerUpChanged { kind, active } => collab.ui.power_up(*kind, *active),
        GameEvent::MultiplierChanged(multiplier) => collab.ui.multiplier(*multiplier),
        GameEvent::HighScore(score) => {
            collab.ui.high_score(*score);
            if let Err(e) = collab.high_scores.set_high_score(*score) {
                log::warn!("High score not saved: {e}");
            }
        }
        GameEvent::Achievement(id) => {
            if collab.achievements.unlock(*id) {
                collab.audio.play(SoundEffect::Achievement);
                collab.ui.achievement(*id);
            }
        }
        GameEvent::Paused(paused) => {
            log::info!("{}", if *paused { "Paused" } else { "Resumed" });
        }
        GameEvent::GameOver { score } => {
            collab.audio.stop_music();
            collab.ui.game_over(*score);
        }
        GameEvent::Explosion { .. }
        | GameEvent::EnemyKilled { .. }
        | GameEvent::BossAppeared { .. }
        | GameEvent::BossPhaseChanged { .. }
        | GameEvent::BossDefeated { .. } => {}
    }
}
