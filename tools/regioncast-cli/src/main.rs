//! Regioncast CLI: watch a region of the screen with positioning overlays.
//!
//! Usage:
//!   regioncast view [OPTIONS]       Run the live viewer (commands on stdin)
//!   regioncast snapshot [OPTIONS]   Capture the region once to a PNG
//!   regioncast config [OPTIONS]     Show the effective stream config
//!   regioncast check                List monitors visible to the capture backend

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use regioncast_common::config::AppConfig;

mod commands;
mod console;

#[derive(Parser)]
#[command(
    name = "regioncast",
    about = "Live view of a screen region with positioning overlays",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live viewer
    View {
        /// Stream config file (region, overlay, speed)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Zero-based monitor index (primary when omitted)
        #[arg(long)]
        monitor: Option<usize>,

        /// Target capture rate
        #[arg(long)]
        fps: Option<u32>,

        /// Use a generated test screen of the given size instead of a monitor
        #[arg(long, value_name = "WxH", value_parser = commands::parse_size)]
        synthetic: Option<(u32, u32)>,

        /// Do not save the stream config on exit
        #[arg(long)]
        no_auto_save: bool,

        /// Write annotated frames to this PNG
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Directory for snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },

    /// Capture the region once and write it to a PNG
    Snapshot {
        /// Stream config file (region, overlay, speed)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Zero-based monitor index (primary when omitted)
        #[arg(long)]
        monitor: Option<usize>,

        /// Overlay mode 0-4 to draw over the capture
        #[arg(long)]
        overlay: Option<u8>,

        /// Use a generated test screen of the given size instead of a monitor
        #[arg(long, value_name = "WxH", value_parser = commands::parse_size)]
        synthetic: Option<(u32, u32)>,

        /// Output file (timestamped name in the snapshot directory by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective stream config
    Config {
        /// Stream config file (region, overlay, speed)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the default application config if none exists
        #[arg(long)]
        init: bool,
    },

    /// List monitors visible to the capture backend
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = AppConfig::load();

    let mut logging = app.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    regioncast_common::logging::init_logging(&logging);

    match cli.command {
        Commands::View {
            config,
            monitor,
            fps,
            synthetic,
            no_auto_save,
            preview,
            snapshot_dir,
        } => commands::view::run(
            &app,
            commands::view::ViewArgs {
                config,
                monitor,
                fps,
                synthetic,
                auto_save: !no_auto_save,
                preview,
                snapshot_dir,
            },
        ),
        Commands::Snapshot {
            config,
            monitor,
            overlay,
            synthetic,
            output,
        } => commands::snapshot::run(&app, config, monitor, overlay, synthetic, output),
        Commands::Config { config, init } => commands::config::run(&app, config, init),
        Commands::Check => commands::check::run(),
    }
}
