use starsim::{ScenarioConfig, Scenario};
use starsim::{bench_gravity, bench_verlet};

use clap::Parser;
use anyhow::Result;
use log::info;
use simplelog::{TermLogger, LevelFilter, Config, TerminalMode, ColorChoice};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Run the direct-vs-tree timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_verlet();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg);

    info!(
        "starting: {} bodies, strategy {:?}, t_end {}",
        scenario.system.bodies.len(),
        scenario.engine.strategy,
        scenario.parameters.t_end,
    );

    let mut step: u64 = 0;
    let mut merged: u64 = 0;
    while scenario.system.t < scenario.parameters.t_end {
        scenario.advance();

        // Drain all colliding pairs this tick, one merge per call
        while scenario.merge_colliding() {
            merged += 1;
        }

        step += 1;
        if step % 1000 == 0 {
            info!(
                "t = {:9.3}, bodies = {}, merges so far = {}",
                scenario.system.t,
                scenario.system.bodies.len(),
                merged,
            );
        }
    }

    info!(
        "done: t = {:.3}, {} bodies remain, {} merges",
        scenario.system.t,
        scenario.system.bodies.len(),
        merged,
    );

    Ok(())
}
