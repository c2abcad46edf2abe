use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "safeeats",
    about = "Scan food barcodes and classify ingredient risk",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up products by barcode and classify their ingredients
    Scan {
        /// EAN/UPC barcodes (8-14 digits)
        #[arg(required = true, value_name = "BARCODE")]
        barcodes: Vec<String>,

        /// Config file [default: ./.safeeats/config.toml, fallback ~/.config/safeeats/config.toml]
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the result cache for this run
        #[arg(long)]
        no_cache: bool,
    },
    /// Classify an ingredient list given as text
    Classify {
        /// Free-text ingredient list, e.g. "water, sugar, aspartame"
        text: String,
    },
    /// Show the rules version, provenance and table
    Rules,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Report format
    #[arg(long, global = true, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show all ingredients (not just flagged ones) and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
