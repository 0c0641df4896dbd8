//! Command-line entry point for starfield.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use starfield::snapshot::{render_snapshot, SnapshotOptions};
use starfield::{AppError, FieldConfig, SnapshotError, Vec2};

#[derive(Parser)]
#[command(name = "starfield", version, about = "Ambient interactive particle field")]
struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of particles
    #[arg(short = 'n', long, global = true)]
    count: Option<usize>,

    /// Seed the spawn RNG for a reproducible field
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open a window and animate the field (default)
    #[cfg(feature = "window")]
    Run,

    /// Render one frame offscreen and write it as PNG
    Snapshot {
        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Ticks to simulate before capturing
        #[arg(long, default_value_t = 120)]
        frames: u32,

        /// Pointer x position, held for the whole run
        #[arg(long, requires = "pointer_y")]
        pointer_x: Option<f32>,

        /// Pointer y position, held for the whole run
        #[arg(long, requires = "pointer_x")]
        pointer_y: Option<f32>,

        /// Output file
        #[arg(short, long, default_value = "starfield.png")]
        output: PathBuf,
    },
}

/// Log level requested by `-v` flags. `None` leaves `RUST_LOG` (or `warn`) in charge.
fn verbosity_level(count: u8) -> Option<log::LevelFilter> {
    match count {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = verbosity_level(cli.verbose) {
        logger.filter_level(level);
    }
    logger.init();

    let mut config = match &cli.config {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    if let Some(count) = cli.count {
        config = config.with_particle_count(count);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    match cli.command {
        #[cfg(feature = "window")]
        None | Some(Command::Run) => starfield::window::run(config),

        #[cfg(not(feature = "window"))]
        None => {
            log::error!("built without the `window` feature; use `starfield snapshot`");
            Ok(())
        }

        Some(Command::Snapshot {
            width,
            height,
            frames,
            pointer_x,
            pointer_y,
            output,
        }) => {
            let options = SnapshotOptions {
                width,
                height,
                frames,
                pointer: pointer_x.zip(pointer_y).map(|(x, y)| Vec2::new(x, y)),
            };
            let canvas = render_snapshot(config, &options)?;
            canvas.save_png(&output).map_err(SnapshotError::from)?;
            log::info!("wrote {}", output.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some(log::LevelFilter::Info));
        assert_eq!(verbosity_level(2), Some(log::LevelFilter::Debug));
        assert_eq!(verbosity_level(3), Some(log::LevelFilter::Trace));
        assert_eq!(verbosity_level(9), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_verbose_flag_enables_debug_logging() {
        let cli = Cli::try_parse_from(["starfield", "-vv", "snapshot"]).unwrap();
        let level = verbosity_level(cli.verbose).unwrap();

        let logger = env_logger::Builder::new().filter_level(level).build();
        let debug = log::Metadata::builder().level(log::Level::Debug).target("starfield").build();
        let trace = log::Metadata::builder().level(log::Level::Trace).target("starfield").build();
        assert!(log::Log::enabled(&logger, &debug));
        assert!(!log::Log::enabled(&logger, &trace));
    }
}
