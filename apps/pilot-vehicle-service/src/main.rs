use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use layerkit::bootstrap::{AppConfig, init_logging};
use pilot_vehicle_service::{PilotApplication, assemble};

/// Pilot vehicle service - vehicle registry assembled under layered-architecture checks
#[derive(Parser)]
#[command(name = "pilot-vehicle-service")]
#[command(about = "Pilot vehicle service - vehicle registry assembled under layered-architecture checks")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the service and run a scripted command/query round
    Run,
    /// Assemble the service, verify every component and exit
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "pilot-vehicle-service failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // Layered config: defaults -> YAML (if provided) -> env (PILOT__*)
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);
    tracing::info!("pilot-vehicle-service starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_service(&config),
        Commands::Check => check(&config),
    }
}

fn check(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking component conformance...");
    let hub = assemble(config)?;
    if hub.checker().is_some() {
        println!("Conformance check passed: {} components", hub.len());
    } else {
        println!("Conformance checking disabled: {} components assembled", hub.len());
    }
    for name in hub.published() {
        println!("  {name}");
    }
    Ok(())
}

fn run_service(config: &AppConfig) -> Result<()> {
    let hub = assemble(config)?;
    let application = hub.get::<PilotApplication>()?;
    let report = application.run(&hub)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
