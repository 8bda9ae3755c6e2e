use std::io::Write;

use crate::core::pair::{EventType, PairRecord};
use crate::core::report::FilterReport;
use crate::filtering::thresholds::Thresholds;
use crate::parsing::bed2d::ParseError;

/// Outcome of classifying one pair against the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    /// Same fragment, same strand: always discarded
    Weird,
    /// `-+` pair closer than the loop threshold: discarded
    Loop,
    /// `+-` pair closer than the uncut threshold: discarded
    Uncut,
    /// Intrachromosomal pair passing all checks: written out
    KeptIntra,
    /// Interchromosomal pair: always written out
    KeptInter,
}

/// Classify one normalized pair. Every pair lands in exactly one class.
pub fn classify(pair: &PairRecord, thresholds: &Thresholds) -> PairClass {
    if !pair.is_intra() {
        return PairClass::KeptInter;
    }
    if pair.is_weird() {
        PairClass::Weird
    } else if pair.event_type == EventType::RevFwd && pair.site_span < thresholds.loops {
        PairClass::Loop
    } else if pair.event_type == EventType::FwdRev && pair.site_span < thresholds.uncuts {
        PairClass::Uncut
    } else {
        PairClass::KeptIntra
    }
}

/// Stream the whole library through the classifier, writing kept pairs to
/// `sink` as 10-column TSV and tallying every outcome.
///
/// # Errors
///
/// Propagates the first `ParseError` from the stream (a malformed record
/// aborts the pass) and any IO error from the sink.
pub fn filter_pairs<I, W>(
    pairs: I,
    sink: &mut W,
    thresholds: &Thresholds,
) -> Result<FilterReport, ParseError>
where
    I: IntoIterator<Item = Result<PairRecord, ParseError>>,
    W: Write,
{
    let mut report = FilterReport::default();

    for pair in pairs {
        let pair = pair?;
        match classify(&pair, thresholds) {
            PairClass::Weird => report.weirds += 1,
            PairClass::Loop => report.loops += 1,
            PairClass::Uncut => report.uncuts += 1,
            PairClass::KeptIntra => {
                report.kept_intra += 1;
                writeln!(sink, "{pair}")?;
            }
            PairClass::KeptInter => {
                report.kept_inter += 1;
                writeln!(sink, "{pair}")?;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::bed2d::{parse_pair_line, PairReader};
    use std::io::Cursor;

    const THRESHOLDS: Thresholds = Thresholds { uncuts: 2, loops: 3 };

    fn class_of(line: &str) -> PairClass {
        classify(&parse_pair_line(line, 1).unwrap(), &THRESHOLDS)
    }

    #[test]
    fn test_inter_pairs_always_kept() {
        // Same fragment and strand, but different chromosomes
        assert_eq!(class_of("chr1 5 15 4 + chr2 10 20 4 +"), PairClass::KeptInter);
    }

    #[test]
    fn test_weird_discarded_regardless_of_thresholds() {
        let pair = parse_pair_line("chr1 5 15 4 + chr1 10 20 4 +", 1).unwrap();
        for t in [
            Thresholds { uncuts: 0, loops: 0 },
            Thresholds { uncuts: 100, loops: 100 },
        ] {
            assert_eq!(classify(&pair, &t), PairClass::Weird);
        }
    }

    #[test]
    fn test_uncut_threshold_boundary() {
        // +- at span 1: below the uncut threshold of 2
        assert_eq!(class_of("chr1 5 15 2 + chr1 10 20 3 -"), PairClass::Uncut);
        // +- at span 2: at the threshold, kept
        assert_eq!(class_of("chr1 5 15 2 + chr1 10 20 4 -"), PairClass::KeptIntra);
    }

    #[test]
    fn test_loop_threshold_boundary() {
        // -+ at span 2: below the loop threshold of 3
        assert_eq!(class_of("chr1 5 15 2 - chr1 10 20 4 +"), PairClass::Loop);
        // -+ at span 3: at the threshold, kept
        assert_eq!(class_of("chr1 5 15 2 - chr1 10 20 5 +"), PairClass::KeptIntra);
    }

    #[test]
    fn test_filter_pass_counts_and_output() {
        let input = "\
chr1 5 15 2 + chr1 10 20 3 -
chr1 5 15 2 - chr1 10 20 4 +
chr1 5 15 4 + chr1 10 20 4 +
chr1 5 15 2 + chr1 100 120 50 -
chr1 5 15 4 + chr2 10 20 4 +
";
        let mut out = Vec::new();
        let report =
            filter_pairs(PairReader::new(Cursor::new(input)), &mut out, &THRESHOLDS).unwrap();

        assert_eq!(report.uncuts, 1);
        assert_eq!(report.loops, 1);
        assert_eq!(report.weirds, 1);
        assert_eq!(report.kept_intra, 1);
        assert_eq!(report.kept_inter, 1);
        assert_eq!(report.total(), 5);

        let written = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "chr1\t5\t15\t2\t+\tchr1\t100\t120\t50\t-");
        assert_eq!(lines[1], "chr1\t5\t15\t4\t+\tchr2\t10\t20\t4\t+");
    }

    #[test]
    fn test_malformed_line_aborts_pass() {
        let input = "chr1 5 15 2 + chr1 10 20 3 -\nbroken line\n";
        let mut out = Vec::new();
        let result = filter_pairs(PairReader::new(Cursor::new(input)), &mut out, &THRESHOLDS);
        assert!(result.is_err());
    }

    #[test]
    fn test_raising_threshold_never_discards_fewer() {
        let input = "\
chr1 5 15 2 + chr1 10 20 3 -
chr1 5 15 2 + chr1 10 20 4 -
chr1 5 15 2 + chr1 10 20 7 -
chr1 5 15 2 - chr1 10 20 4 +
";
        let mut previous = 0;
        for uncuts in 0..8 {
            let thresholds = Thresholds { uncuts, loops: 0 };
            let mut out = Vec::new();
            let report =
                filter_pairs(PairReader::new(Cursor::new(input)), &mut out, &thresholds)
                    .unwrap();
            assert!(report.uncuts >= previous);
            previous = report.uncuts;
        }
    }
}
