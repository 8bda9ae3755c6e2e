use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::pair::EventType;
use crate::filtering::histogram::{EventHistogram, MAX_SITES};

/// Rescales a median absolute deviation to a standard-deviation equivalent
/// under a normal-distribution assumption
const MAD_TO_STDEV: f64 = 0.67449;

#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error(
        "the {0} threshold could not be estimated from the library; \
         supply thresholds manually"
    )]
    NoQualifyingSite(&'static str),

    #[error("invalid thresholds '{0}': expected two non-negative integers as UNCUT,LOOP")]
    InvalidManual(String),
}

/// Minimum fragment separations below which `+-` (uncut) and `-+` (loop)
/// intrachromosomal pairs are discarded. Immutable once computed; the sole
/// state carried from estimation into the filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum span to keep a `+-` pair
    pub uncuts: i64,
    /// Minimum span to keep a `-+` pair
    pub loops: i64,
}

impl Thresholds {
    /// Estimate both thresholds from an event histogram.
    ///
    /// The log-counts of the four intrachromosomal event types are compared
    /// at each site distance: the per-site median forms the expected
    /// background, and the MAD across all cells (rescaled by 0.67449) the
    /// tolerated deviation. Scanning sites from furthest to closest, the
    /// smallest site whose `+-` (resp. `-+`) log-count still sits within
    /// one expected deviation of the background becomes the uncut (resp.
    /// loop) threshold. Spurious near-range events are overrepresented, so
    /// they fail this test and the scan settles just outside them.
    ///
    /// Empty cells contribute `-inf` log-counts: they are excluded from the
    /// medians and can never qualify.
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::NoQualifyingSite` when no site across the
    /// whole scanned range qualifies for one or both event types.
    pub fn estimate(hist: &EventHistogram) -> Result<Self, ThresholdError> {
        let log_counts: Vec<[f64; MAX_SITES]> = EventType::INTRA
            .iter()
            .map(|&event| {
                let mut row = [f64::NEG_INFINITY; MAX_SITES];
                for (site, cell) in row.iter_mut().enumerate() {
                    let count = hist.count(event, site);
                    if count > 0 {
                        *cell = (count as f64).ln();
                    }
                }
                row
            })
            .collect();

        // Expected background: median log-count across event types per site
        let mut site_median = [f64::NAN; MAX_SITES];
        for (site, med) in site_median.iter_mut().enumerate() {
            let finite: Vec<f64> = log_counts
                .iter()
                .map(|row| row[site])
                .filter(|v| v.is_finite())
                .collect();
            if let Some(m) = median(finite) {
                *med = m;
            }
        }

        // MAD over all finite cell deviations, rescaled to a stdev equivalent
        let deviations: Vec<f64> = log_counts
            .iter()
            .flat_map(|row| {
                row.iter()
                    .zip(site_median.iter())
                    .filter(|(v, m)| v.is_finite() && m.is_finite())
                    .map(|(v, m)| (v - m).abs())
            })
            .collect();
        let mad =
            median(deviations).ok_or(ThresholdError::NoQualifyingSite("uncut and loop"))?;
        let exp_stdev = mad / MAD_TO_STDEV;

        // Scan from furthest to closest, keeping the last (closest) site
        // still consistent with the background
        let uncut_row = &log_counts[2];
        let loop_row = &log_counts[3];
        let mut uncuts = None;
        let mut loops = None;
        for site in (0..MAX_SITES).rev() {
            if within_background(uncut_row[site], site_median[site], exp_stdev) {
                uncuts = Some(site as i64);
            }
            if within_background(loop_row[site], site_median[site], exp_stdev) {
                loops = Some(site as i64);
            }
        }

        let thresholds = match (uncuts, loops) {
            (Some(uncuts), Some(loops)) => Self { uncuts, loops },
            (None, Some(_)) => return Err(ThresholdError::NoQualifyingSite("uncut")),
            (Some(_), None) => return Err(ThresholdError::NoQualifyingSite("loop")),
            (None, None) => return Err(ThresholdError::NoQualifyingSite("uncut and loop")),
        };

        info!(
            uncuts = thresholds.uncuts,
            loops = thresholds.loops,
            "inferred thresholds"
        );
        Ok(thresholds)
    }
}

fn within_background(log_count: f64, site_median: f64, exp_stdev: f64) -> bool {
    let deviation = (log_count - site_median).abs();
    deviation.is_finite() && deviation <= exp_stdev
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

impl FromStr for Thresholds {
    type Err = ThresholdError;

    /// Parses the manual `UNCUT,LOOP` form accepted on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ThresholdError::InvalidManual(s.to_string());
        let (uncuts, loops) = s.split_once(',').ok_or_else(invalid)?;
        let uncuts: i64 = uncuts.trim().parse().map_err(|_| invalid())?;
        let loops: i64 = loops.trim().parse().map_err(|_| invalid())?;
        if uncuts < 0 || loops < 0 {
            return Err(invalid());
        }
        Ok(Self { uncuts, loops })
    }
}

impl std::fmt::Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "uncuts={} loops={}", self.uncuts, self.loops)
    }
}
