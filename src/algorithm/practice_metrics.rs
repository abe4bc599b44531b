//! Per-practice SLA metrics
//!
//! Each transfer is attributed to the practice owning the requesting ASID.
//! Every practice in the directory appears in the output, including those
//! with no transfers. ASIDs that no practice owns are collected and returned
//! alongside the metrics instead of being reported per occurrence.

use std::collections::BTreeSet;

use crate::algorithm::sla::{SlaBand, SlaCounter, calculate_percentage};
use crate::filter::{DateTimeRange, filter_transfers_by_date_requested};
use crate::models::{PracticeDetails, PracticeLookup, Transfer, TransferStatus};

/// SLA band counts of a practice's integrated transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegratedPracticeMetrics {
    /// Integrated transfers with an SLA duration
    pub transfer_count: usize,
    pub within_3_days: usize,
    pub within_8_days: usize,
    pub beyond_8_days: usize,
}

impl IntegratedPracticeMetrics {
    fn from_counter(counter: &SlaCounter) -> Self {
        Self {
            transfer_count: counter.total(),
            within_3_days: counter.within_3_days(),
            within_8_days: counter.within_8_days(),
            beyond_8_days: counter.beyond_8_days(),
        }
    }

    /// Count for one band
    #[must_use]
    pub fn count(&self, band: SlaBand) -> usize {
        match band {
            SlaBand::Within3Days => self.within_3_days,
            SlaBand::Within8Days => self.within_8_days,
            SlaBand::Beyond8Days => self.beyond_8_days,
        }
    }

    /// Share of this practice's SLA-eligible transfers in the band
    #[must_use]
    pub fn percentage(&self, band: SlaBand) -> f64 {
        calculate_percentage(self.count(band), self.transfer_count)
    }
}

/// Metrics for one practice in the reporting month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeMetrics {
    pub ods_code: String,
    pub name: String,
    /// All transfers requested by the practice, whatever their status
    pub requested_transfer_count: usize,
    pub integrated: IntegratedPracticeMetrics,
}

/// Practice metrics plus the ASIDs that could not be attributed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PracticeMetricsOutcome {
    /// One entry per directory practice, in directory order
    pub practices: Vec<PracticeMetrics>,
    /// Requesting ASIDs not found in the directory
    pub unresolved_asids: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, Default)]
struct PracticeCounts {
    requested: usize,
    sla: SlaCounter,
}

/// Accumulates SLA counts per practice for a single run
#[derive(Debug)]
pub struct PracticeSlaCounter<'a> {
    lookup: &'a PracticeLookup,
    counts: Vec<PracticeCounts>,
    unresolved_asids: BTreeSet<String>,
}

impl<'a> PracticeSlaCounter<'a> {
    /// Start a counter with zeroed counts for every practice
    #[must_use]
    pub fn new(lookup: &'a PracticeLookup) -> Self {
        Self {
            lookup,
            counts: vec![PracticeCounts::default(); lookup.len()],
            unresolved_asids: BTreeSet::new(),
        }
    }

    /// Attribute one transfer to its requesting practice
    pub fn record(&mut self, transfer: &Transfer) {
        let Some(idx) = self.lookup.practice_index(&transfer.requesting_practice_asid) else {
            self.unresolved_asids
                .insert(transfer.requesting_practice_asid.clone());
            return;
        };

        let counts = &mut self.counts[idx];
        counts.requested += 1;
        if let Some(duration) = transfer
            .sla_duration
            .filter(|_| transfer.status == TransferStatus::Integrated)
        {
            counts.sla.increment(duration);
        }
    }

    /// ASIDs seen so far that no practice owns
    #[must_use]
    pub fn unexpected_asid_codes(&self) -> &BTreeSet<String> {
        &self.unresolved_asids
    }

    /// Final per-practice metrics
    #[must_use]
    pub fn results(self) -> PracticeMetricsOutcome {
        let practices = self
            .lookup
            .all_practices()
            .zip(&self.counts)
            .map(|(practice, counts)| derive_practice_metrics(practice, counts))
            .collect();

        PracticeMetricsOutcome {
            practices,
            unresolved_asids: self.unresolved_asids,
        }
    }
}

fn derive_practice_metrics(practice: &PracticeDetails, counts: &PracticeCounts) -> PracticeMetrics {
    PracticeMetrics {
        ods_code: practice.ods_code.clone(),
        name: practice.name.clone(),
        requested_transfer_count: counts.requested,
        integrated: IntegratedPracticeMetrics::from_counter(&counts.sla),
    }
}

/// Calculate SLA metrics for every practice in the directory
///
/// # Arguments
/// * `transfers` - Classified transfers
/// * `lookup` - Practice directory
/// * `time_range` - Reporting window; transfers requested outside it are ignored
#[must_use]
pub fn aggregate_practice(
    transfers: &[Transfer],
    lookup: &PracticeLookup,
    time_range: DateTimeRange,
) -> PracticeMetricsOutcome {
    let mut counter = PracticeSlaCounter::new(lookup);

    for transfer in filter_transfers_by_date_requested(transfers, time_range) {
        counter.record(transfer);
    }

    counter.results()
}
