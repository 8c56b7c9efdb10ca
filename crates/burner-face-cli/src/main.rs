//! burner-face - pilot burner face hole layouts
//!
//! Usage:
//!   burner-face layout [-p policy] [-c config.yaml] [--json]
//!   burner-face holes [-p policy] [-c config.yaml]
//!   burner-face export [-p policy] (-o file | -d dir) [-f dxf|svg]
//!   burner-face config [-c config.yaml]
//!   burner-face policies

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use burner_face::{ExportFormat, Policy};

mod cli;

use cli::{cmd_config, cmd_export, cmd_holes, cmd_layout, cmd_policies, ExportArgs, LayoutArgs};

#[derive(Parser)]
#[command(name = "burner-face")]
#[command(version, about = "Hexagonal hole layouts for pilot burner faces")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a layout policy and print the report
    Layout {
        /// Layout policy (plate, honeycomb)
        #[arg(short, long, default_value = "plate")]
        policy: Policy,

        /// Geometry configuration (YAML, lengths in meters)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write a timestamped drawing into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Drawing format for --export-dir
        #[arg(short, long, default_value = "dxf")]
        format: ExportFormat,
    },

    /// Dump hole outlines per layer as JSON
    Holes {
        #[arg(short, long, default_value = "plate")]
        policy: Policy,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the layout drawing to a DXF or SVG file
    Export {
        #[arg(short, long, default_value = "plate")]
        policy: Policy,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Drawing format (default: from the output extension, else dxf)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file
        #[arg(short, long, conflicts_with = "dir", required_unless_present = "dir")]
        output: Option<PathBuf>,

        /// Output directory; the file name is timestamped
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Print the effective configuration as YAML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List available layout policies
    Policies,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Layout { policy, config, json, export_dir, format } => {
            cmd_layout(LayoutArgs { policy, config, json, export_dir, format })
        }
        Commands::Holes { policy, config } => cmd_holes(policy, config),
        Commands::Export { policy, config, format, output, dir } => {
            cmd_export(ExportArgs { policy, config, format, output, dir })
        }
        Commands::Config { config } => cmd_config(config),
        Commands::Policies => {
            cmd_policies();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
