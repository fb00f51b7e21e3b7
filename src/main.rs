mod config;
mod globe;
mod hud;
mod playback;
mod quakes;
mod scale;
mod settings;
mod terminal;

use clap::{Args, Parser, Subcommand};
use config::PlayConfig;
use quakes::Catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use settings::Settings;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quakeglobe")]
#[command(about = "Earthquake playback on a rotating terminal globe")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a quake catalog (JSON) on the globe
    Play {
        /// Catalog file; falls back to the config file's default
        file: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Replay a synthetic catalog along the world's seismic belts
    Demo {
        /// Number of synthetic quakes
        #[arg(long, default_value_t = 800)]
        events: usize,
        /// RNG seed for a reproducible catalog
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Real minutes the full catalog plays back over
    #[arg(long)]
    minutes: Option<f64>,
    /// Autorotation rate, degrees per second
    #[arg(long)]
    rotate: Option<f64>,
    /// Initial tilt, degrees
    #[arg(long)]
    tilt: Option<f64>,
    /// Initial longitude under the center of the view
    #[arg(long)]
    lon: Option<f64>,
    /// Seconds between frames
    #[arg(long, default_value_t = 0.03)]
    time: f32,
    /// Start paused
    #[arg(long)]
    paused: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("quakeglobe: {err}");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Commands::Play { file, view } => {
            let path = file.or_else(|| settings.playback.catalog.clone()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no catalog file given and none configured",
                )
            })?;
            let catalog = Catalog::load(&path)?;
            globe::run(catalog, &play_config(&view, &settings))
        }
        Commands::Demo { events, seed, view } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let catalog = Catalog::synthetic(events, &mut rng);
            globe::run(catalog, &play_config(&view, &settings))
        }
    }
}

fn play_config(view: &ViewArgs, settings: &Settings) -> PlayConfig {
    PlayConfig {
        minutes: view
            .minutes
            .or(settings.playback.minutes)
            .unwrap_or(12.0)
            .max(0.05),
        rotate: view.rotate.or(settings.globe.rotate).unwrap_or(5.0),
        tilt: view.tilt.or(settings.globe.tilt).unwrap_or(-10.0),
        lon: view.lon.or(settings.globe.lon).unwrap_or(100.0),
        time_step: view.time.max(0.005),
        start_paused: view.paused,
    }
}
