use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::report::FilterReport;
use crate::filtering::engine::filter_pairs;
use crate::filtering::histogram::EventHistogram;
use crate::filtering::thresholds::Thresholds;
use crate::parsing::bed2d::{open_pairs, PairReader};

#[derive(Args)]
pub struct FilterArgs {
    /// Input 2D BED pair file (.gz accepted; '-' for stdin, which requires
    /// --thresholds since estimation needs a second pass over the file)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output path for the filtered library ('-' for stdout)
    #[arg(required = true)]
    pub output: PathBuf,

    /// Manual thresholds as UNCUT,LOOP; skips estimation
    #[arg(short = 't', long)]
    pub thresholds: Option<Thresholds>,
}

/// Execute filter subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed, thresholds cannot be
/// estimated, or the output cannot be written.
pub fn run(args: &FilterArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let from_stdin = is_stdio(&args.input);

    let thresholds = match args.thresholds {
        Some(t) => t,
        None => {
            if from_stdin {
                anyhow::bail!(
                    "estimating thresholds requires a second pass over the input; \
                     use --thresholds when reading from stdin"
                );
            }
            let pairs = open_pairs(&args.input)?;
            let hist = EventHistogram::collect(pairs)?;
            if verbose {
                eprintln!("Histogram built from {} intrachromosomal events", hist.total());
            }
            Thresholds::estimate(&hist)?
        }
    };

    if verbose {
        eprintln!("Filtering with thresholds: {thresholds}");
    }

    // Second, independent pass over the full library
    let report = if from_stdin {
        let stdin = io::stdin();
        let pairs = PairReader::new(stdin.lock());
        write_filtered(pairs, &args.output, &thresholds)?
    } else {
        let pairs = open_pairs(&args.input)?;
        write_filtered(pairs, &args.output, &thresholds)?
    };

    match format {
        OutputFormat::Text => print_text_summary(&report),
        OutputFormat::Json => print_json_summary(&report, &thresholds)?,
    }

    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn write_filtered<R: BufRead>(
    pairs: PairReader<R>,
    output: &Path,
    thresholds: &Thresholds,
) -> anyhow::Result<FilterReport> {
    let mut sink: Box<dyn Write> = if is_stdio(output) {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(output)?))
    };
    let report = filter_pairs(pairs, &mut sink, thresholds)?;
    sink.flush()?;
    Ok(report)
}

/// Quick summary of the pass on stderr, leaving stdout to the pair stream
fn print_text_summary(report: &FilterReport) {
    eprintln!(
        "Proportion of inter contacts: {:.2}%",
        report.inter_ratio()
    );
    eprintln!(
        "{} pairs discarded: Loops: {}, Uncuts: {}, Weirds: {}",
        report.discarded(),
        report.loops,
        report.uncuts,
        report.weirds
    );
    eprintln!(
        "{} pairs kept ({:.2}%)",
        report.kept(),
        report.kept_ratio()
    );
}

fn print_json_summary(report: &FilterReport, thresholds: &Thresholds) -> anyhow::Result<()> {
    let summary = serde_json::json!({
        "thresholds": thresholds,
        "discarded": {
            "loops": report.loops,
            "uncuts": report.uncuts,
            "weirds": report.weirds,
            "total": report.discarded(),
        },
        "kept": {
            "intra": report.kept_intra,
            "inter": report.kept_inter,
            "total": report.kept(),
        },
        "inter_ratio": report.inter_ratio(),
        "kept_ratio": report.kept_ratio(),
    });
    eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
