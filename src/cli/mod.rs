//! Command-line interface for pairsieve.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **filter**: Remove spurious pairs (loops, uncuts, weirds) from a library
//! - **thresholds**: Estimate the filtering thresholds without filtering
//!
//! ## Usage
//!
//! ```text
//! # Filter a library, estimating thresholds from its first million pairs
//! pairsieve filter library.bed2d filtered.bed2d
//!
//! # Filter with manually chosen thresholds (works on stdin)
//! zcat library.bed2d.gz | pairsieve filter - - --thresholds 3,2
//!
//! # Inspect the inferred thresholds and the event histogram
//! pairsieve thresholds library.bed2d --histogram
//! ```

use clap::{Parser, Subcommand};

pub mod filter;
pub mod thresholds;

#[derive(Parser)]
#[command(name = "pairsieve")]
#[command(version)]
#[command(about = "Filter spurious Hi-C pairs (loops, uncuts) from 2D BED libraries")]
#[command(
    long_about = "pairsieve analyses a Hi-C pair library and removes artifactual read pairs caused by incomplete restriction digestion.\n\nIntrachromosomal +- (uncut) and -+ (loop) pairs whose reads are separated by fewer restriction fragments than a threshold are excluded. Thresholds are estimated from the library itself, at the distance where the abundance of these events deviates from the long-range background, or can be supplied manually."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for summaries
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter spurious pairs from a library
    Filter(filter::FilterArgs),

    /// Estimate filtering thresholds without filtering
    Thresholds(thresholds::ThresholdsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
