use solsim::{ScenarioConfig, Scenario, SolarSystem};
use solsim::{bench_cache_reuse, bench_tick};
use solsim::simulation::units::KM_PER_AU;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Solar system simulation with an adaptive force cache")]
struct Args {
    /// Scenario file; bare names are looked up in the crate's `scenarios/` directory
    #[arg(short, long, default_value = "solar_system.yaml")]
    file: PathBuf,

    /// Override the number of ticks to run
    #[arg(short, long)]
    steps: Option<usize>,

    /// Evaluate the force cache on the worker pool
    #[arg(long, conflicts_with = "sequential")]
    parallel: bool,

    /// Evaluate the force cache on the calling thread
    #[arg(long)]
    sequential: bool,

    /// Print positions every n ticks (0 = only at the end)
    #[arg(long, default_value_t = 0)]
    report_every: usize,

    /// Run the benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = if args.file.exists() {
        args.file.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file)
    };

    let mut cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if let Some(steps) = args.steps {
        cfg.parameters.steps = steps;
    }
    if args.parallel {
        cfg.engine.parallel = true;
    }
    if args.sequential {
        cfg.engine.parallel = false;
    }
    Ok(cfg)
}

fn print_positions(step: usize, system: &SolarSystem) {
    println!("t = {:.1} s (tick {step})", system.time());
    for (_, name, x) in system.positions() {
        println!(
            "  {name:<12} x = {:>14.6e} km  y = {:>14.6e} km  z = {:>14.6e} km  r = {:.4} AU",
            x.x,
            x.y,
            x.z,
            x.magnitude() / KM_PER_AU
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_tick()?;
        bench_cache_reuse()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let mut scenario = Scenario::build(scenario_cfg).context("failed to build scenario")?;

    let report_every = args.report_every;
    let total = scenario.run(|step, system, _| {
        if report_every > 0 && step % report_every == 0 {
            print_positions(step, system);
        }
    })?;

    info!(
        "finished {} ticks: {} pair evaluations, {} recomputed, {} reused",
        scenario.steps, total.pairs, total.recomputed, total.reused
    );
    print_positions(scenario.steps, &scenario.system);

    Ok(())
}
