use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::pair::{PairRecord, ReadEnd, Strand};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed pair record: {0}")]
    MalformedRecord(String),
}

/// Parse one 2D BED line into a normalized pair record.
///
/// The line must split into exactly 10 whitespace-delimited fields, twice
/// `chrom start end fragment strand`, one set per read in the pair.
///
/// # Errors
///
/// Returns `ParseError::MalformedRecord` if the field count is wrong, an
/// integer field does not parse, or a strand is not `+`/`-`. Line numbers
/// in errors are 1-based.
pub fn parse_pair_line(line: &str, line_num: usize) -> Result<PairRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 10 {
        return Err(ParseError::MalformedRecord(format!(
            "line {} has {} fields, expected 10 (chrom start end fragment strand, once per read)",
            line_num,
            fields.len()
        )));
    }

    let read1 = parse_read_end(&fields[0..5], line_num)?;
    let read2 = parse_read_end(&fields[5..10], line_num)?;
    Ok(PairRecord::new(read1, read2))
}

fn parse_read_end(fields: &[&str], line_num: usize) -> Result<ReadEnd, ParseError> {
    let invalid_int = |name: &str, value: &str| {
        ParseError::MalformedRecord(format!(
            "invalid {name} on line {line_num}: '{value}'"
        ))
    };

    let start: u64 = fields[1]
        .parse()
        .map_err(|_| invalid_int("start", fields[1]))?;
    let end: u64 = fields[2]
        .parse()
        .map_err(|_| invalid_int("end", fields[2]))?;
    let fragment: i64 = fields[3]
        .parse()
        .map_err(|_| invalid_int("fragment index", fields[3]))?;
    let strand = Strand::parse(fields[4]).ok_or_else(|| {
        ParseError::MalformedRecord(format!(
            "invalid strand on line {}: '{}' (expected + or -)",
            line_num, fields[4]
        ))
    })?;

    Ok(ReadEnd {
        chrom: fields[0].to_string(),
        start,
        end,
        fragment,
        strand,
    })
}

/// Lazy, single-pass iterator of normalized pair records over any buffered
/// reader. Blank lines are skipped; the first error ends the pass.
pub struct PairReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_num: usize,
}

impl<R: BufRead> PairReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for PairReader<R> {
    type Item = Result<PairRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_num += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_pair_line(&line, self.line_num));
        }
    }
}

/// Open a 2D BED pair file for reading, decompressing `.gz` inputs
/// transparently.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_pairs(path: &Path) -> Result<PairReader<Box<dyn BufRead>>, ParseError> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(PairReader::new(reader))
}
