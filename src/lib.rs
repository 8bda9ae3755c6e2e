//! # pairsieve
//!
//! A library for filtering spurious events out of Hi-C pair libraries.
//!
//! Incomplete restriction-enzyme digestion leaves artifactual read pairs in
//! 3C/Hi-C libraries: "uncuts" (`+-` pairs spanning an undigested site) and
//! "loops" (`-+` pairs from self-ligated fragments). Both look like
//! short-range contacts and drown out real signal close to the diagonal.
//!
//! `pairsieve` removes them by excluding `+-` and `-+` intrachromosomal
//! pairs whose reads are closer than a threshold number of restriction
//! fragments. The thresholds mark the distance at which the abundance of
//! these orientations deviates from the rest of the library, estimated
//! automatically from the median absolute deviation of pairs at longer
//! range, or supplied manually.
//!
//! The input is a 2D BED file, one pair per line:
//! `chrom1 start1 end1 fragment1 strand1 chrom2 start2 end2 fragment2 strand2`
//! where fragment indices are 0-based restriction fragment ordinals.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use pairsieve::{filter_pairs, EventHistogram, PairReader, Thresholds};
//!
//! let library = "chr1\t5\t15\t2\t+\tchr1\t10\t20\t3\t-\n";
//!
//! // First pass: estimate thresholds from the head of the library
//! let hist = EventHistogram::collect(PairReader::new(Cursor::new(library))).unwrap();
//! let thresholds = Thresholds::estimate(&hist).unwrap();
//!
//! // Second pass: stream the full library through the filter
//! let mut kept = Vec::new();
//! let report = filter_pairs(
//!     PairReader::new(Cursor::new(library)),
//!     &mut kept,
//!     &thresholds,
//! )
//! .unwrap();
//! eprintln!("{} pairs kept ({:.2}%)", report.kept(), report.kept_ratio());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Pair records, event types, and the filtering report
//! - [`parsing`]: 2D BED parsing and the lazy pair stream
//! - [`filtering`]: Histograms, threshold estimation, and the filter pass
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod filtering;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::pair::{EventType, PairRecord, ReadEnd, Strand};
pub use crate::core::report::FilterReport;
pub use crate::filtering::engine::{classify, filter_pairs, PairClass};
pub use crate::filtering::histogram::{EventHistogram, ESTIMATION_PAIRS, MAX_SITES};
pub use crate::filtering::thresholds::{ThresholdError, Thresholds};
pub use crate::parsing::bed2d::{open_pairs, parse_pair_line, PairReader, ParseError};
