pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleetmap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Labeled inventory of clusters, services and their instance IPs", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Configuration file (YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Directory fixture to inventory (YAML or JSON); defaults to the built-in sample fleet"
    )]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the cluster → service → instance tree")]
    Clusters {
        #[arg(short, long, help = "Only show services of this application")]
        app: Option<String>,

        #[arg(long, value_enum, default_value_t = TreeFormat::Text, help = "Output format")]
        format: TreeFormat,
    },
    #[command(about = "List the application labels found in the fleet")]
    Apps,
    #[command(about = "Extract labels from image identifiers without contacting the directory")]
    Labels {
        #[arg(required = true, help = "Image identifiers, e.g. registry/org/prod-api:1.2")]
        images: Vec<String>,
    },
    #[command(about = "Export the inventory or run metrics")]
    Export {
        #[arg(long, value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(short, long, help = "Output file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Prometheus,
}
