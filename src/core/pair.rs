use serde::{Deserialize, Serialize};

/// Read orientation on the genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a strand from its 2D BED representation (`+` or `-`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Orientation class of a Hi-C pair, derived from the strands of its two
/// reads after canonical reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// `++`: both reads forward (same-strand, suspect at distance zero)
    FwdFwd,
    /// `--`: both reads reverse (same-strand, suspect at distance zero)
    RevRev,
    /// `+-`: convergent pair, the uncut candidate orientation
    FwdRev,
    /// `-+`: divergent pair, the loop candidate orientation
    RevFwd,
    /// Reads map to different chromosomes
    Inter,
}

impl EventType {
    /// Event type for an intrachromosomal pair with the given (reordered)
    /// strands
    pub fn intra(strand1: Strand, strand2: Strand) -> Self {
        match (strand1, strand2) {
            (Strand::Forward, Strand::Forward) => Self::FwdFwd,
            (Strand::Reverse, Strand::Reverse) => Self::RevRev,
            (Strand::Forward, Strand::Reverse) => Self::FwdRev,
            (Strand::Reverse, Strand::Forward) => Self::RevFwd,
        }
    }

    /// The four intrachromosomal event types, in histogram row order
    pub const INTRA: [EventType; 4] = [
        Self::FwdFwd,
        Self::RevRev,
        Self::FwdRev,
        Self::RevFwd,
    ];
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FwdFwd => write!(f, "++"),
            Self::RevRev => write!(f, "--"),
            Self::FwdRev => write!(f, "+-"),
            Self::RevFwd => write!(f, "-+"),
            Self::Inter => write!(f, "inter"),
        }
    }
}

/// One read of a Hi-C pair: genomic interval plus the restriction fragment
/// it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEnd {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    /// 0-based index of the restriction fragment the read is attributed to
    pub fragment: i64,
    pub strand: Strand,
}

/// A canonically ordered Hi-C pair.
///
/// For intrachromosomal pairs, read 1 always carries the smaller start
/// coordinate; if the raw record violated this, the two read ends are
/// swapped whole at construction. `site_span` is the signed number of
/// restriction fragments separating the reads after reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    pub read1: ReadEnd,
    pub read2: ReadEnd,
    pub site_span: i64,
    pub event_type: EventType,
}

impl PairRecord {
    pub fn new(mut read1: ReadEnd, mut read2: ReadEnd) -> Self {
        let intra = read1.chrom == read2.chrom;
        if intra && read2.start < read1.start {
            std::mem::swap(&mut read1, &mut read2);
        }

        let site_span = read2.fragment - read1.fragment;
        let event_type = if intra {
            EventType::intra(read1.strand, read2.strand)
        } else {
            EventType::Inter
        };

        Self {
            read1,
            read2,
            site_span,
            event_type,
        }
    }

    pub fn is_intra(&self) -> bool {
        self.event_type != EventType::Inter
    }

    /// Same fragment, same strand: always spurious regardless of thresholds
    pub fn is_weird(&self) -> bool {
        self.is_intra()
            && self.read1.fragment == self.read2.fragment
            && self.read1.strand == self.read2.strand
    }
}

impl std::fmt::Display for PairRecord {
    /// Serializes the pair as the 10 tab-separated 2D BED columns, in
    /// normalized order
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.read1.chrom,
            self.read1.start,
            self.read1.end,
            self.read1.fragment,
            self.read1.strand,
            self.read2.chrom,
            self.read2.start,
            self.read2.end,
            self.read2.fragment,
            self.read2.strand,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::bed2d::parse_pair_line;

    #[test]
    fn test_inter_pair_keeps_order() {
        let pair = parse_pair_line("a 1 3 0 - b 2 4 1 -", 1).unwrap();
        assert_eq!(pair.read1.chrom, "a");
        assert_eq!(pair.read1.start, 1);
        assert_eq!(pair.read1.fragment, 0);
        assert_eq!(pair.read1.strand, Strand::Reverse);
        assert_eq!(pair.read2.chrom, "b");
        assert_eq!(pair.read2.start, 2);
        assert_eq!(pair.read2.fragment, 1);
        assert_eq!(pair.site_span, 1);
        assert_eq!(pair.event_type, EventType::Inter);
    }

    #[test]
    fn test_intra_pair_reordered() {
        let pair = parse_pair_line("chr1 10 20 5 + chr1 5 15 2 -", 1).unwrap();
        assert_eq!(pair.read1.start, 5);
        assert_eq!(pair.read1.end, 15);
        assert_eq!(pair.read1.fragment, 2);
        assert_eq!(pair.read1.strand, Strand::Reverse);
        assert_eq!(pair.read2.start, 10);
        assert_eq!(pair.read2.end, 20);
        assert_eq!(pair.read2.fragment, 5);
        assert_eq!(pair.read2.strand, Strand::Forward);
        assert_eq!(pair.event_type, EventType::RevFwd);
        assert_eq!(pair.site_span, 3);
    }

    #[test]
    fn test_reordering_swaps_all_paired_fields() {
        let pair = parse_pair_line("chr2 100 150 9 - chr2 40 90 3 +", 1).unwrap();
        assert!(pair.read1.start <= pair.read2.start);
        // All four paired fields moved together with the start coordinate
        assert_eq!(
            (pair.read1.start, pair.read1.end, pair.read1.fragment, pair.read1.strand),
            (40, 90, 3, Strand::Forward)
        );
        assert_eq!(
            (pair.read2.start, pair.read2.end, pair.read2.fragment, pair.read2.strand),
            (100, 150, 9, Strand::Reverse)
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let pair = parse_pair_line("chr1 10 20 5 + chr1 5 15 2 -", 1).unwrap();
        let reparsed = parse_pair_line(&pair.to_string(), 1).unwrap();
        assert_eq!(reparsed, pair);
    }

    #[test]
    fn test_site_span_non_negative_for_intra() {
        for line in [
            "chr1 5 15 2 - chr1 10 20 5 +",
            "chr1 10 20 5 + chr1 5 15 2 -",
            "chr1 7 9 4 + chr1 7 9 4 +",
        ] {
            let pair = parse_pair_line(line, 1).unwrap();
            assert!(pair.is_intra());
            assert!(pair.site_span >= 0);
        }
    }

    #[test]
    fn test_weird_detection() {
        let weird = parse_pair_line("chr1 5 15 4 + chr1 10 20 4 +", 1).unwrap();
        assert!(weird.is_weird());

        let convergent = parse_pair_line("chr1 5 15 4 + chr1 10 20 4 -", 1).unwrap();
        assert!(!convergent.is_weird());

        let inter = parse_pair_line("chr1 5 15 4 + chr2 10 20 4 +", 1).unwrap();
        assert!(!inter.is_weird());
    }

    #[test]
    fn test_tsv_round_trip() {
        let pair = parse_pair_line("chr1 5 15 2 - chr1 10 20 5 +", 1).unwrap();
        assert_eq!(pair.to_string(), "chr1\t5\t15\t2\t-\tchr1\t10\t20\t5\t+");
    }
}
