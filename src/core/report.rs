use serde::Serialize;

/// Outcome tally of one filtering pass.
///
/// Every classified pair lands in exactly one of the five counters, so the
/// counters always sum to the number of records consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Same-fragment, same-strand pairs (always discarded)
    pub weirds: u64,
    /// `-+` pairs below the loop threshold (discarded)
    pub loops: u64,
    /// `+-` pairs below the uncut threshold (discarded)
    pub uncuts: u64,
    /// Intrachromosomal pairs written to the output
    pub kept_intra: u64,
    /// Interchromosomal pairs written to the output
    pub kept_inter: u64,
}

impl FilterReport {
    pub fn kept(&self) -> u64 {
        self.kept_intra + self.kept_inter
    }

    pub fn discarded(&self) -> u64 {
        self.weirds + self.loops + self.uncuts
    }

    pub fn total(&self) -> u64 {
        self.kept() + self.discarded()
    }

    /// Percentage of kept pairs that are interchromosomal contacts
    pub fn inter_ratio(&self) -> f64 {
        if self.kept_inter == 0 {
            0.0
        } else {
            100.0 * self.kept_inter as f64 / self.kept() as f64
        }
    }

    /// Percentage of classified pairs that were kept
    pub fn kept_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            100.0 * self.kept() as f64 / self.total() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios() {
        let report = FilterReport {
            weirds: 5,
            loops: 10,
            uncuts: 15,
            kept_intra: 60,
            kept_inter: 10,
        };
        assert_eq!(report.kept(), 70);
        assert_eq!(report.discarded(), 30);
        assert_eq!(report.total(), 100);
        assert!((report.kept_ratio() - 70.0).abs() < 1e-9);
        assert!((report.inter_ratio() - 100.0 * 10.0 / 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratios_without_inter_contacts() {
        let report = FilterReport {
            kept_intra: 42,
            ..Default::default()
        };
        assert_eq!(report.inter_ratio(), 0.0);
        assert!((report.kept_ratio() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let report = FilterReport::default();
        assert_eq!(report.total(), 0);
        assert_eq!(report.inter_ratio(), 0.0);
        assert_eq!(report.kept_ratio(), 0.0);
    }
}
