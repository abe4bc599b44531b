//! National dashboard records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::algorithm::national_metrics::{IntegratedMetrics, NationalMetrics, StatusMetrics};
use crate::filter::ReportingMonth;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedMetricsPresentation {
    pub transfer_percentage: f64,
    pub transfer_count: usize,
    pub within_3_days: usize,
    pub within_8_days: usize,
    pub beyond_8_days: usize,
}

impl From<IntegratedMetrics> for IntegratedMetricsPresentation {
    fn from(metrics: IntegratedMetrics) -> Self {
        Self {
            transfer_percentage: metrics.transfer_percentage,
            transfer_count: metrics.transfer_count,
            within_3_days: metrics.within_3_days,
            within_8_days: metrics.within_8_days,
            beyond_8_days: metrics.beyond_8_days,
        }
    }
}

/// Count and percentage for failed, pending and paper fallback figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferCountPresentation {
    pub transfer_count: usize,
    pub transfer_percentage: f64,
}

impl From<StatusMetrics> for TransferCountPresentation {
    fn from(metrics: StatusMetrics) -> Self {
        Self {
            transfer_count: metrics.transfer_count,
            transfer_percentage: metrics.transfer_percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyNationalMetrics {
    pub transfer_count: usize,
    pub integrated: IntegratedMetricsPresentation,
    pub failed: TransferCountPresentation,
    pub pending: TransferCountPresentation,
    pub paper_fallback: TransferCountPresentation,
    pub year: i32,
    pub month: u32,
}

/// National metrics file contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalMetricsPresentation {
    pub generated_on: DateTime<Utc>,
    pub metrics: Vec<MonthlyNationalMetrics>,
}

/// Build the national dashboard record for one month
#[must_use]
pub fn construct_national_metrics(
    national_metrics: &NationalMetrics,
    month: ReportingMonth,
    generated_on: DateTime<Utc>,
) -> NationalMetricsPresentation {
    NationalMetricsPresentation {
        generated_on,
        metrics: vec![MonthlyNationalMetrics {
            transfer_count: national_metrics.initiated_transfer_count,
            integrated: national_metrics.integrated.into(),
            failed: national_metrics.failed.into(),
            pending: national_metrics.pending.into(),
            paper_fallback: national_metrics.paper_fallback.into(),
            year: month.year(),
            month: month.month(),
        }],
    }
}
