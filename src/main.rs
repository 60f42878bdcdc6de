//! Pack simulator entry point: CLI wiring and config-driven engine construction.

mod cli;

use std::process;

use tracing_subscriber::EnvFilter;

use pack_sim::config::ScenarioConfig;
use pack_sim::io::export::export_csv;
use pack_sim::sim::engine::Engine;
use pack_sim::sim::report::RunReport;
use pack_sim::sim::types::PackState;

use crate::cli::{CliOptions, Parsed};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    // --scenario takes priority, then --preset (defaults to demo)
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("demo"))
    };

    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(Parsed::Run(opts)) => opts,
        Ok(Parsed::Help) => {
            cli::print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    init_logging();

    let mut scenario = load_scenario(&cli);

    // Apply hours override
    if let Some(hours) = cli.hours {
        scenario.simulation.default_hours = hours;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let mut engine = Engine::new(scenario.build_pack(), scenario.simulation.default_hours);
    let initial = PackState::of(engine.pack());
    if !cli.quiet {
        println!("start               | {initial}");
    }
    let results = engine.run(&scenario.actions);

    if !cli.quiet {
        for r in &results {
            println!("{r}");
        }
        println!();
    }

    println!("{}", RunReport::from_results(&initial, &results));

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }
}
