//! Headless japa-match runner (default binary).
//!
//! Plays one level to the end with the solver, logging every swap and cascade
//! cue. Configured through `JAPA_*` environment variables (see
//! [`japa_match::config`]) and `RUST_LOG`.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use japa_match::config::RunConfig;
use japa_match::core::{
    CascadePass, LevelResult, LevelTable, ProgressUpdate, Session, SessionHooks,
};
use japa_match::engine::{play_best_swap_observed, SolveError};

/// Routes session events to the log
#[derive(Debug, Default)]
struct LoggingHooks {
    passes: u32,
}

impl SessionHooks for LoggingHooks {
    fn on_cascade_pass(&mut self, pass: &CascadePass) -> Result<()> {
        self.passes += 1;
        let deities: Vec<&str> = pass.deities.iter().map(|d| d.as_str()).collect();
        info!(
            combo = pass.combo,
            deities = ?deities,
            bonus = pass.bonus.as_str().unwrap_or("-"),
            score = pass.score,
            "cascade cue"
        );
        Ok(())
    }

    fn on_progress(&mut self, update: &ProgressUpdate) -> Result<()> {
        info!(
            counted = update.counted.total(),
            progress = update.objective_completed,
            target = update.objective_target,
            "progress"
        );
        Ok(())
    }

    fn on_level_complete(&mut self, result: &LevelResult) -> Result<()> {
        info!(
            level = result.level_id,
            stars = result.stars,
            best_score = result.best_score,
            "level complete"
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from_env();
    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    let table = load_levels(config)?;
    let level = table.get(config.level)?;
    let mode = config.mode.unwrap_or_else(|| level.default_mode());
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(level = level.id, ?mode, seed, "starting headless run");

    let mut session = Session::with_source(level, mode, StdRng::seed_from_u64(seed))
        .with_context(|| format!("cannot start level {}", level.id))?;
    let mut hooks = LoggingHooks::default();

    let mut swaps = 0u32;
    while swaps < config.max_swaps {
        match play_best_swap_observed(&mut session, &mut hooks) {
            Ok(result) => {
                swaps += 1;
                info!(
                    swap = swaps,
                    points = result.points(),
                    combo = result.max_combo(),
                    rescued = result.rescued,
                    moves_left = result.moves_remaining,
                    "swap resolved"
                );
            }
            Err(SolveError::NotPlayable) => break,
            Err(err) => {
                warn!(code = err.code(), "{}", err.message());
                break;
            }
        }
    }
    if swaps >= config.max_swaps && !session.status().is_terminal() {
        warn!(max_swaps = config.max_swaps, "autoplay cap reached");
    }

    println!(
        "level {} {}: score {} moves left {} progress {}/{} stars {} ({} cascade passes)",
        level.id,
        session.status().as_str(),
        session.score(),
        session.moves_remaining(),
        session.objective_completed(),
        session.objective_target(),
        session.stars(),
        hooks.passes,
    );

    if config.print_snapshot {
        let json = session
            .snapshot()
            .to_json()
            .context("failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}

fn load_levels(config: &RunConfig) -> Result<LevelTable> {
    let Some(path) = config.levels_path.as_deref() else {
        return Ok(LevelTable::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level table {path}"))?;
    LevelTable::from_json(&json).with_context(|| format!("invalid level table {path}"))
}
