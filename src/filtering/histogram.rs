use std::io::Write;

use crate::core::pair::{EventType, PairRecord};
use crate::parsing::bed2d::ParseError;

/// Fragment-distance cap: pairs separated by this many restriction sites or
/// more are not counted during estimation (they are still filtered normally)
pub const MAX_SITES: usize = 500;

/// Estimation consumes at most this many pairs from the head of the library
pub const ESTIMATION_PAIRS: usize = 1_000_000;

/// Per-event-type occurrence counts indexed by restriction-site distance.
///
/// One row per intrachromosomal event type (`++`, `--`, `+-`, `-+`), each
/// row indexed by `site_span` in `[0, MAX_SITES)`. Interchromosomal pairs
/// and pairs at or beyond the cap are not recorded.
#[derive(Debug, Clone)]
pub struct EventHistogram {
    counts: [[u64; MAX_SITES]; 4],
}

impl EventHistogram {
    pub fn new() -> Self {
        Self {
            counts: [[0; MAX_SITES]; 4],
        }
    }

    fn row(event: EventType) -> Option<usize> {
        match event {
            EventType::FwdFwd => Some(0),
            EventType::RevRev => Some(1),
            EventType::FwdRev => Some(2),
            EventType::RevFwd => Some(3),
            EventType::Inter => None,
        }
    }

    /// Record one pair. Interchromosomal pairs and spans outside
    /// `[0, MAX_SITES)` are ignored.
    pub fn record(&mut self, pair: &PairRecord) {
        let Some(row) = Self::row(pair.event_type) else {
            return;
        };
        let Ok(site) = usize::try_from(pair.site_span) else {
            return;
        };
        if site < MAX_SITES {
            self.counts[row][site] += 1;
        }
    }

    /// Build a histogram from the first [`ESTIMATION_PAIRS`] pairs of a
    /// stream (fewer if the stream ends first).
    ///
    /// # Errors
    ///
    /// Propagates the first `ParseError` from the stream.
    pub fn collect<I>(pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = Result<PairRecord, ParseError>>,
    {
        let mut hist = Self::new();
        for pair in pairs.into_iter().take(ESTIMATION_PAIRS) {
            hist.record(&pair?);
        }
        Ok(hist)
    }

    #[cfg(test)]
    pub fn set(&mut self, event: EventType, site: usize, count: u64) {
        if let Some(row) = Self::row(event) {
            self.counts[row][site] = count;
        }
    }

    pub fn count(&self, event: EventType, site: usize) -> u64 {
        Self::row(event).map_or(0, |row| self.counts[row][site])
    }

    /// Total number of recorded events across all rows
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Dump the histogram as TSV (`site` plus one column per event type),
    /// the form consumed by external plotting tools.
    ///
    /// # Errors
    ///
    /// Returns any IO error from the writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "site\t++\t--\t+-\t-+")?;
        for site in 0..MAX_SITES {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}",
                site,
                self.counts[0][site],
                self.counts[1][site],
                self.counts[2][site],
                self.counts[3][site],
            )?;
        }
        Ok(())
    }
}

impl Default for EventHistogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::bed2d::parse_pair_line;

    fn pair(line: &str) -> PairRecord {
        parse_pair_line(line, 1).unwrap()
    }

    #[test]
    fn test_record_counts_by_event_and_span() {
        let mut hist = EventHistogram::new();
        // -+ at span 3 (reordered from the raw line)
        hist.record(&pair("chr1 10 20 5 + chr1 5 15 2 -"));
        // +- at span 1
        hist.record(&pair("chr1 5 15 2 + chr1 10 20 3 -"));
        hist.record(&pair("chr1 5 15 2 + chr1 10 20 3 -"));

        assert_eq!(hist.count(EventType::RevFwd, 3), 1);
        assert_eq!(hist.count(EventType::FwdRev, 1), 2);
        assert_eq!(hist.count(EventType::FwdFwd, 3), 0);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_inter_and_capped_pairs_excluded() {
        let mut hist = EventHistogram::new();
        hist.record(&pair("chr1 10 20 5 + chr2 5 15 2 -"));
        // span 600, beyond the cap
        hist.record(&pair("chr1 5 15 0 + chr1 10 20 600 -"));
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_collect_propagates_parse_errors() {
        let pairs = vec![
            Ok(pair("chr1 5 15 2 + chr1 10 20 3 -")),
            Err(ParseError::MalformedRecord("line 2".to_string())),
        ];
        assert!(EventHistogram::collect(pairs).is_err());
    }

    #[test]
    fn test_write_tsv_shape() {
        let hist = EventHistogram::new();
        let mut out = Vec::new();
        hist.write_tsv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("site\t++\t--\t+-\t-+"));
        assert_eq!(lines.count(), MAX_SITES);
    }
}
