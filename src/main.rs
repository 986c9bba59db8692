use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use buster::config::GameConfig;
use buster::engine::script::InputScript;
use buster::scene::test_scene::load_test_scene;
use buster::{GameApp, Result};

const DEFAULT_SCRIPT: &str =
    "-*80, right*40, right+fire*3, right*20, -*10, fire*2, -*10, up*25, left*30, -*30, down*20, -*60";

#[derive(Parser)]
#[command(name = "buster", about = "Run the platformer core headless on scripted input")]
struct Args {
    /// Frames to simulate; defaults to the length of the script
    #[arg(long)]
    frames: Option<u32>,
    /// Input script, e.g. "-*70, right*30, right+fire*2, up*20"
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    script: String,
    /// TOML file overriding tuning and stage layout
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with an empty stage
    #[arg(long)]
    no_enemies: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.no_enemies {
        config.stage.lobbers.clear();
    }

    let script: InputScript = args.script.parse()?;
    let frames = args.frames.unwrap_or_else(|| script.len());
    let mut app = GameApp::new(load_test_scene(config));

    match app.run_script(&script, frames)? {
        Some(report) => info!(
            frames = report.frame,
            state = ?report.state,
            position = ?report.position,
            health = report.health,
            alive = report.alive,
            bullets = report.live_bullets,
            "run finished"
        ),
        None => info!("nothing to run"),
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}
