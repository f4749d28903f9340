//! Headless tank arena runner
//!
//! Usage: `tanks [config.toml|config.ron]`

use std::path::PathBuf;

use hierarchy_engine::foundation::logging;
use hierarchy_engine::foundation::time::Timer;
use tanks::{Game, ScriptedInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default_level("info");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    match &config_path {
        Some(path) => log::info!("Loading configuration from {}", path.display()),
        None => log::info!("Using default configuration"),
    }
    let mut game = Game::load(config_path.as_deref())?;
    let mut input = ScriptedInput::new(game.config().simulation.script.clone());

    let mut timer = Timer::new();
    let result = game.run(&mut input);
    timer.update();

    match result {
        Ok(score) => {
            log::info!(
                "Session finished: score {} after {} frames ({:.3}s wall clock)",
                score,
                game.frame(),
                timer.total_time()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Session failed: {e}");
            Err(e.into())
        }
    }
}
