use anyhow::Result;
use tracing::info;

use onslaught_app::autopilot::Autopilot;
use onslaught_app::runner;
use onslaught_app::settings::RunSettings;
use onslaught_sim::SimulationEngine;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = RunSettings::from_env()?;
    let config = settings.sim_config()?;
    let autopilot = Autopilot::new(settings.mode, &config.game.weapons);
    let mut engine = SimulationEngine::new(config)?;

    info!(
        seed = settings.seed,
        mode = ?settings.mode,
        max_ticks = settings.max_ticks,
        realtime = settings.realtime,
        "starting run"
    );

    let summary = if settings.realtime {
        runner::run_realtime(engine, autopilot, settings.max_ticks)?
    } else {
        let mut autopilot = autopilot;
        runner::run_headless(&mut engine, &mut autopilot, settings.max_ticks)
    };

    info!(phase = ?summary.phase, wave = summary.wave, kills = summary.total_kills, "run finished");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
