//! Service-level banding of transfer durations
//!
//! A transfer's SLA duration is bucketed into one of three bands. Bounds are
//! inclusive on the lower band: exactly three days is still within three days.

use chrono::TimeDelta;
use serde::Serialize;

/// Upper bound (inclusive) of the first band
pub const THREE_DAYS_IN_SECONDS: i64 = 259_200;
/// Upper bound (inclusive) of the second band
pub const EIGHT_DAYS_IN_SECONDS: i64 = 691_200;

/// SLA band, ordered by duration threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SlaBand {
    /// Up to and including three days
    Within3Days,
    /// Over three days, up to and including eight days
    Within8Days,
    /// Over eight days
    Beyond8Days,
}

impl SlaBand {
    /// Every band, in threshold order
    pub const ALL: [SlaBand; 3] = [Self::Within3Days, Self::Within8Days, Self::Beyond8Days];

    const fn index(self) -> usize {
        match self {
            Self::Within3Days => 0,
            Self::Within8Days => 1,
            Self::Beyond8Days => 2,
        }
    }
}

/// Assign a duration to its SLA band
#[must_use]
pub fn band_of(sla_duration: TimeDelta) -> SlaBand {
    if sla_duration <= TimeDelta::seconds(THREE_DAYS_IN_SECONDS) {
        SlaBand::Within3Days
    } else if sla_duration <= TimeDelta::seconds(EIGHT_DAYS_IN_SECONDS) {
        SlaBand::Within8Days
    } else {
        SlaBand::Beyond8Days
    }
}

/// Per-band counter with every band always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlaCounter {
    counts: [usize; 3],
}

impl SlaCounter {
    /// Create an empty counter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Band the duration and count it
    pub fn increment(&mut self, sla_duration: TimeDelta) {
        self.counts[band_of(sla_duration).index()] += 1;
    }

    /// Count for a single band
    #[must_use]
    pub fn count(&self, band: SlaBand) -> usize {
        self.counts[band.index()]
    }

    #[must_use]
    pub fn within_3_days(&self) -> usize {
        self.count(SlaBand::Within3Days)
    }

    #[must_use]
    pub fn within_8_days(&self) -> usize {
        self.count(SlaBand::Within8Days)
    }

    #[must_use]
    pub fn beyond_8_days(&self) -> usize {
        self.count(SlaBand::Beyond8Days)
    }

    /// Sum over all bands
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl FromIterator<TimeDelta> for SlaCounter {
    fn from_iter<I: IntoIterator<Item = TimeDelta>>(iter: I) -> Self {
        let mut counter = Self::new();
        for duration in iter {
            counter.increment(duration);
        }
        counter
    }
}

/// `numerator / denominator` as a percentage rounded to two decimal places
///
/// Exact halves round to even. A zero denominator yields 0 rather than a
/// division fault.
#[must_use]
pub fn calculate_percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let percentage = 100.0 * numerator as f64 / denominator as f64;
    (percentage * 100.0).round_ties_even() / 100.0
}
