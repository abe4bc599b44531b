//! Practice dashboard records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::algorithm::practice_metrics::{IntegratedPracticeMetrics, PracticeMetrics};
use crate::algorithm::sla::SlaBand;
use crate::filter::ReportingMonth;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedPracticeMetricsPresentation {
    pub transfer_count: usize,
    pub within_3_days_percentage: f64,
    pub within_8_days_percentage: f64,
    pub beyond_8_days_percentage: f64,
}

impl From<&IntegratedPracticeMetrics> for IntegratedPracticeMetricsPresentation {
    fn from(metrics: &IntegratedPracticeMetrics) -> Self {
        Self {
            transfer_count: metrics.transfer_count,
            within_3_days_percentage: metrics.percentage(SlaBand::Within3Days),
            within_8_days_percentage: metrics.percentage(SlaBand::Within8Days),
            beyond_8_days_percentage: metrics.percentage(SlaBand::Beyond8Days),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterMetrics {
    pub integrated: IntegratedPracticeMetricsPresentation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    pub year: i32,
    pub month: u32,
    pub requester: RequesterMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummary {
    pub ods_code: String,
    pub name: String,
    pub metrics: Vec<MonthlyMetrics>,
}

/// Practice metrics file contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeMetricsPresentation {
    pub generated_on: DateTime<Utc>,
    pub practices: Vec<PracticeSummary>,
}

/// Build the practice dashboard records for one month
#[must_use]
pub fn construct_practice_summaries(
    practice_metrics: &[PracticeMetrics],
    month: ReportingMonth,
    generated_on: DateTime<Utc>,
) -> PracticeMetricsPresentation {
    let practices = practice_metrics
        .iter()
        .map(|practice| PracticeSummary {
            ods_code: practice.ods_code.clone(),
            name: practice.name.clone(),
            metrics: vec![MonthlyMetrics {
                year: month.year(),
                month: month.month(),
                requester: RequesterMetrics {
                    integrated: (&practice.integrated).into(),
                },
            }],
        })
        .collect();

    PracticeMetricsPresentation {
        generated_on,
        practices,
    }
}
