use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dartroom_player::{PlayerConfig, PlayerEvent, ThrowOutcome};
use dartroom_room::{AimPolicy, SessionSettings, run_dart_session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dartroom-cli", about = "Run and inspect the dartroom player controller")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the default player config
    Config {
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: Format,
    },
    /// Walk up to the dartboard, play one round, and print the outcome
    Play {
        /// Player config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Frame step in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f32,
        /// Throw this many seconds after the game starts instead of aiming
        #[arg(short, long)]
        aim_seconds: Option<f32>,
        /// Give up after this much simulated time
        #[arg(long, default_value = "30")]
        max_seconds: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Info => {
            println!("dartroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", dartroom_input::crate_info());
            println!("player: {}", dartroom_player::crate_info());
            println!("room: {}", dartroom_room::crate_info());
        }
        Commands::Config { format } => {
            let config = PlayerConfig::default();
            let text = match format {
                Format::Yaml => serde_yaml::to_string(&config)?,
                Format::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{text}");
        }
        Commands::Play {
            config,
            dt,
            aim_seconds,
            max_seconds,
        } => {
            let player_config = match &config {
                Some(path) => PlayerConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => PlayerConfig::default(),
            };
            let settings = SessionSettings {
                dt,
                aim: aim_seconds.map_or(AimPolicy::Auto, AimPolicy::After),
                max_seconds,
            };

            tracing::debug!(?settings, "starting scripted session");
            let report = run_dart_session(player_config, settings)?;

            for event in &report.events {
                match event {
                    PlayerEvent::Interacted { name, received, .. } => {
                        println!("interacted with {name} (receiver: {received})")
                    }
                    PlayerEvent::GameStarted { anchor, at } => {
                        let p = anchor.position;
                        println!(
                            "t={at:.2}s game started, moving to ({:.2}, {:.2}, {:.2})",
                            p.x, p.y, p.z
                        )
                    }
                    PlayerEvent::GameEnded { at, .. } => println!("t={at:.2}s game ended"),
                }
            }
            match report.result {
                Some(r) => println!(
                    "{} (distance {:.3} from bullseye)",
                    match r.outcome {
                        ThrowOutcome::Hit => "Hit the bullseye!",
                        ThrowOutcome::Miss => "Missed the bullseye!",
                    },
                    r.distance
                ),
                None => println!("No crosshair, throw not scored"),
            }
            println!("frames: {}", report.frames);
            println!("{}", report.final_state);
            println!("score: {}", report.scorecard);
        }
    }

    Ok(())
}
