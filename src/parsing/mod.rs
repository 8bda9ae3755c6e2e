//! Parsers for Hi-C pair libraries.
//!
//! The input format is 2D BED: one pair per line, 10 whitespace-separated
//! columns (`chrom start end fragment strand`, once per read), no header.
//! Gzipped files are handled transparently.

pub mod bed2d;

pub use bed2d::{open_pairs, parse_pair_line, PairReader, ParseError};
