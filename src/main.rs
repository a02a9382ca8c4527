//! Terminal teleprompter - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tprompt::config::CliOverrides;
use tprompt::output::{JsonLinesSink, SnapshotSink};
use tprompt::state::prompt::parse_duration;
use tprompt::view::ColorConfig;
use tracing::info;

/// Terminal teleprompter - scroll a script at a steady pace
#[derive(Parser, Debug)]
#[command(name = "tprompt")]
#[command(version)]
#[command(about = "Scroll a plain-text script up the terminal at a steady, adjustable speed")]
pub struct Args {
    /// Script file (reads piped stdin if not provided)
    pub file: Option<PathBuf>,

    /// Initial scroll speed in rows per second
    #[arg(short, long)]
    pub speed: Option<f64>,

    /// Fit the speed so the script takes this long (SS, MM:SS or HH:MM:SS)
    #[arg(short, long, value_parser = parse_duration_arg)]
    pub duration: Option<f64>,

    /// Countdown before playing, in seconds (0 disables it)
    #[arg(short, long)]
    pub countdown: Option<u32>,

    /// Start mirrored for beam-splitter glass
    #[arg(short, long)]
    pub mirror: bool,

    /// Colour theme
    #[arg(long, value_parser = ["light", "dark", "amber", "mint"])]
    pub theme: Option<String>,

    /// Font size; larger means a narrower reading column
    #[arg(long, value_parser = clap::value_parser!(u16).range(8..=200))]
    pub font_size: Option<u16>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write every playback snapshot to this file as JSON lines
    #[arg(long)]
    pub snapshot_log: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            speed: self.speed,
            target_duration_secs: self.duration,
            countdown_seconds: self.countdown,
            mirrored: self.mirror.then_some(true),
            theme: self.theme.clone(),
            font_size: self.font_size,
        }
    }
}

fn parse_duration_arg(raw: &str) -> Result<f64, String> {
    parse_duration(raw)
        .map(|d| d.as_secs_f64())
        .ok_or_else(|| format!("'{raw}' is not a duration (use SS, MM:SS or HH:MM:SS)"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tprompt::config::load_config_with_precedence(args.config.clone())?;
        let merged = tprompt::config::merge_config(config_file);
        let with_env = tprompt::config::apply_env_overrides(merged);
        tprompt::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    tprompt::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = tprompt::source::detect_script_source(args.file.clone());
    let script = source.load()?;

    let mut sinks: Vec<Box<dyn SnapshotSink>> = Vec::new();
    if let Some(path) = &args.snapshot_log {
        sinks.push(Box::new(JsonLinesSink::create(path)?));
    }

    let colors = ColorConfig::from_env_and_args(args.no_color);
    tprompt::view::run_with_script(script, &config, colors, sinks)?;

    Ok(())
}
