//! Tests for national metrics

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use gp2gp_metrics::algorithm::sla::{EIGHT_DAYS_IN_SECONDS, THREE_DAYS_IN_SECONDS};
    use gp2gp_metrics::algorithm::{aggregate_national, calculate_national_metrics};
    use gp2gp_metrics::models::{Transfer, TransferStatus};

    use crate::utils::{an_integer, build_transfer, december_2019};

    fn with_status(status: TransferStatus, sla_seconds: Option<i64>) -> Transfer {
        Transfer {
            status,
            sla_duration: sla_seconds.map(TimeDelta::seconds),
            ..build_transfer()
        }
    }

    fn mixed_month() -> Vec<Transfer> {
        vec![
            with_status(TransferStatus::Pending, None),
            with_status(TransferStatus::PendingWithError, None),
            with_status(TransferStatus::Integrated, Some(THREE_DAYS_IN_SECONDS)),
            with_status(TransferStatus::Integrated, Some(EIGHT_DAYS_IN_SECONDS)),
            with_status(TransferStatus::Integrated, Some(EIGHT_DAYS_IN_SECONDS)),
            with_status(TransferStatus::Integrated, Some(EIGHT_DAYS_IN_SECONDS + 1)),
            with_status(TransferStatus::Integrated, Some(EIGHT_DAYS_IN_SECONDS + 1)),
            with_status(TransferStatus::Integrated, Some(EIGHT_DAYS_IN_SECONDS + 1)),
            with_status(TransferStatus::Failed, None),
        ]
    }

    #[test]
    fn test_no_transfers_gives_zero_everywhere() {
        let metrics = calculate_national_metrics(&[]);

        assert_eq!(metrics.initiated_transfer_count, 0);
        assert_eq!(metrics.integrated.transfer_count, 0);
        assert_eq!(metrics.integrated.transfer_percentage, 0.0);
        assert_eq!(metrics.failed.transfer_percentage, 0.0);
        assert_eq!(metrics.pending.transfer_percentage, 0.0);
        assert_eq!(metrics.paper_fallback.transfer_count, 0);
        assert_eq!(metrics.paper_fallback.transfer_percentage, 0.0);
    }

    #[test]
    fn test_mixed_month() {
        let transfers = mixed_month();
        let metrics = aggregate_national(&transfers, december_2019().time_range().unwrap());

        assert_eq!(metrics.initiated_transfer_count, 9);
        assert_eq!(metrics.integrated.transfer_count, 6);
        assert_eq!(metrics.integrated.transfer_percentage, 66.67);
        assert_eq!(metrics.integrated.within_3_days, 1);
        assert_eq!(metrics.integrated.within_8_days, 2);
        assert_eq!(metrics.integrated.beyond_8_days, 3);
        assert_eq!(metrics.failed.transfer_count, 1);
        assert_eq!(metrics.failed.transfer_percentage, 11.11);
        assert_eq!(metrics.pending.transfer_count, 2);
        assert_eq!(metrics.pending.transfer_percentage, 22.22);
        assert_eq!(metrics.paper_fallback.transfer_count, 6);
        assert_eq!(metrics.paper_fallback.transfer_percentage, 66.67);
    }

    #[test]
    fn test_all_pending_transfers_fall_back_to_paper() {
        let transfer_count = an_integer(2, 10);
        let transfers: Vec<Transfer> = (0..transfer_count)
            .map(|_| with_status(TransferStatus::Pending, None))
            .collect();
        let refs: Vec<&Transfer> = transfers.iter().collect();

        let metrics = calculate_national_metrics(&refs);

        assert_eq!(metrics.initiated_transfer_count, transfer_count);
        assert_eq!(metrics.pending.transfer_percentage, 100.0);
        assert_eq!(metrics.paper_fallback.transfer_count, transfer_count);
        assert_eq!(metrics.integrated.transfer_count, 0);
    }

    #[test]
    fn test_integrated_without_duration_counts_as_integrated_but_not_banded() {
        let transfers = [with_status(TransferStatus::Integrated, None)];
        let refs: Vec<&Transfer> = transfers.iter().collect();

        let metrics = calculate_national_metrics(&refs);

        assert_eq!(metrics.integrated.transfer_count, 1);
        assert_eq!(metrics.integrated.within_3_days, 0);
        assert_eq!(metrics.paper_fallback.transfer_count, 1);
    }
}
