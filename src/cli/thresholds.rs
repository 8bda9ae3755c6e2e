use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::filtering::histogram::EventHistogram;
use crate::filtering::thresholds::Thresholds;
use crate::parsing::bed2d::{open_pairs, PairReader};

#[derive(Args)]
pub struct ThresholdsArgs {
    /// Input 2D BED pair file (.gz accepted; '-' for stdin)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Also dump the per-site event histogram as TSV on stdout
    #[arg(long)]
    pub histogram: bool,
}

/// Execute thresholds subcommand: estimation pass only, no filtering
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or thresholds cannot be
/// estimated.
pub fn run(args: &ThresholdsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let hist = if args.input.to_string_lossy() == "-" {
        let stdin = io::stdin();
        EventHistogram::collect(PairReader::new(stdin.lock()))?
    } else {
        EventHistogram::collect(open_pairs(&args.input)?)?
    };

    if verbose {
        eprintln!("Histogram built from {} intrachromosomal events", hist.total());
    }

    if args.histogram {
        let mut out = BufWriter::new(io::stdout());
        hist.write_tsv(&mut out)?;
        out.flush()?;
    }

    let thresholds = Thresholds::estimate(&hist)?;

    match format {
        OutputFormat::Text => eprintln!("Inferred thresholds: {thresholds}"),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::to_string_pretty(&thresholds)?);
        }
    }

    Ok(())
}
