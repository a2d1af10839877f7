//! Star Siege headless demo
//!
//! Runs one session with the autopilot at the controls and reports the
//! outcome. Rendering and real audio are left to hosts embedding the library.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use star_siege::Settings;
    use star_siege::audio::{AudioManager, LogBackend};
    use star_siege::autopilot::Autopilot;
    use star_siege::highscores::{FileHighScore, HighScoreStore, MemoryHighScore};
    use star_siege::renderer::LastFrame;
    use star_siege::session::{Collaborators, Session};
    use star_siege::ui::LogUi;

    #[derive(Parser, Debug)]
    #[command(name = "star-siege")]
    #[command(about = "Run a headless Star Siege session under autopilot")]
    struct Cli {
        /// Settings file (JSON); defaults are used when missing
        #[arg(long, env = "STAR_SIEGE_SETTINGS")]
        settings: Option<PathBuf>,
        /// Override the session seed
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate (stops early on game over)
        #[arg(long, default_value_t = 3_600)]
        frames: u32,
        /// High score file; kept in memory when omitted
        #[arg(long)]
        high_score: Option<PathBuf>,
        /// Print the final render snapshot as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut settings = cli
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }

        let high_scores: Box<dyn HighScoreStore> = match &cli.high_score {
            Some(path) => Box::new(FileHighScore::open(path)),
            None => Box::new(MemoryHighScore::default()),
        };
        let collab = Collaborators {
            audio: AudioManager::new(Box::new(LogBackend)),
            ui: Box::new(LogUi::default()),
            renderer: Box::new(LastFrame::default()),
            high_scores,
            ..Default::default()
        };

        let mut session = Session::new(settings, collab);
        let mut pilot = Autopilot::new();
        let mut frames = 0;
        while frames < cli.frames && !session.is_over() {
            let input = pilot.next_input(session.state());
            session.step(&input);
            frames += 1;
        }

        let state = session.state();
        println!(
            "seed {} | {} frames | score {} | high score {} | kills {} | bosses {} | health {}%{}",
            state.seed,
            frames,
            state.scoring.score(),
            state.scoring.high_score(),
            state.kills,
            state.spawner.bosses_spawned,
            state.entities.player.health_percent(),
            if state.is_over() { " | GAME OVER" } else { "" },
        );
        let unlocked = session.collaborators().achievements.unlocked();
        if !unlocked.is_empty() {
            let titles: Vec<_> = unlocked.iter().map(|id| id.title()).collect();
            println!("achievements: {}", titles.join(", "));
        }

        if cli.json {
            let json = serde_json::to_string_pretty(&session.snapshot())
                .context("serializing final snapshot")?;
            println!("{json}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive `star_siege::Session` directly on the web
}
