//! Service-wide monthly metrics
//!
//! All percentages are of the total transfer count, rounded to two decimal
//! places, and 0 when there are no transfers.

use crate::algorithm::sla::{SlaCounter, calculate_percentage};
use crate::filter::{DateTimeRange, filter_transfers_by_date_requested};
use crate::models::{Transfer, TransferStatus};

/// A count and its share of all transfers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusMetrics {
    pub transfer_count: usize,
    pub transfer_percentage: f64,
}

impl StatusMetrics {
    fn of(transfer_count: usize, total: usize) -> Self {
        Self {
            transfer_count,
            transfer_percentage: calculate_percentage(transfer_count, total),
        }
    }
}

/// Integrated transfers and their SLA band counts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegratedMetrics {
    pub transfer_count: usize,
    pub transfer_percentage: f64,
    pub within_3_days: usize,
    pub within_8_days: usize,
    pub beyond_8_days: usize,
}

/// National metrics for one reporting month
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NationalMetrics {
    /// Every transfer initiated in the month
    pub initiated_transfer_count: usize,
    pub integrated: IntegratedMetrics,
    pub failed: StatusMetrics,
    /// Pending and pending-with-error combined
    pub pending: StatusMetrics,
    /// Transfers that did not integrate within eight days
    pub paper_fallback: StatusMetrics,
}

fn count_transfers_with_status(
    transfers: &[&Transfer],
    predicate: impl Fn(TransferStatus) -> bool,
) -> usize {
    transfers
        .iter()
        .filter(|transfer| predicate(transfer.status))
        .count()
}

/// Calculate national metrics over the transfers requested in the window
#[must_use]
pub fn aggregate_national(transfers: &[Transfer], time_range: DateTimeRange) -> NationalMetrics {
    let transfers: Vec<&Transfer> = filter_transfers_by_date_requested(transfers, time_range).collect();
    calculate_national_metrics(&transfers)
}

/// Calculate national metrics over already-scoped transfers
#[must_use]
pub fn calculate_national_metrics(transfers: &[&Transfer]) -> NationalMetrics {
    let total = transfers.len();

    let integrated_count =
        count_transfers_with_status(transfers, |status| status == TransferStatus::Integrated);
    let sla_counts: SlaCounter = transfers
        .iter()
        .filter(|transfer| transfer.status == TransferStatus::Integrated)
        .filter_map(|transfer| transfer.sla_duration)
        .collect();

    let failed_count =
        count_transfers_with_status(transfers, |status| status == TransferStatus::Failed);
    let pending_count = count_transfers_with_status(transfers, |status| status.is_pending());

    let integrated_within_sla = sla_counts.within_3_days() + sla_counts.within_8_days();
    let paper_fallback_count = total - integrated_within_sla;

    NationalMetrics {
        initiated_transfer_count: total,
        integrated: IntegratedMetrics {
            transfer_count: integrated_count,
            transfer_percentage: calculate_percentage(integrated_count, total),
            within_3_days: sla_counts.within_3_days(),
            within_8_days: sla_counts.within_8_days(),
            beyond_8_days: sla_counts.beyond_8_days(),
        },
        failed: StatusMetrics::of(failed_count, total),
        pending: StatusMetrics::of(pending_count, total),
        paper_fallback: StatusMetrics::of(paper_fallback_count, total),
    }
}
