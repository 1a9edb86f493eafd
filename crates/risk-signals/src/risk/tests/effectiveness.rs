use super::common::*;
use crate::risk::effectiveness::{portfolio_summary, risk_distribution, signal_effectiveness};
use crate::risk::domain::RiskTier;

#[test]
fn signals_are_sorted_descending_by_lift() {
    let data = dataset(vec![
        stressed_record("c-1", 1),
        stressed_record("c-2", 0),
        quiet_record("c-3", 0),
        quiet_record("c-4", 1),
        record("c-5", 85.0, 85.0, 90.0, 0.8, 2.0, 5.0, 1),
    ]);

    let signals = signal_effectiveness(&data);
    assert_eq!(signals.len(), 5);
    for pair in signals.windows(2) {
        assert!(pair[0].risk_lift >= pair[1].risk_lift);
    }
}

#[test]
fn lift_is_neutral_when_absent_rate_is_zero() {
    // Delinquency only among flagged customers: the absent-side rate is 0 and
    // the ratio must collapse to 1 rather than infinity.
    let data = dataset(vec![stressed_record("c-1", 2), quiet_record("c-2", 0)]);

    for signal in signal_effectiveness(&data) {
        assert!(signal.risk_lift.is_finite());
        assert!(signal.risk_lift >= 0.0);
    }

    let cash_surge = signal_effectiveness(&data)
        .into_iter()
        .find(|signal| signal.code == "signal_cash_surge")
        .expect("cash surge metrics present");
    assert_eq!(cash_surge.delinquency_rate_when_absent, 0.0);
    assert_eq!(cash_surge.risk_lift, 1.0);
}

#[test]
fn lift_is_neutral_for_zero_prevalence_signals() {
    // Nobody triggers any signal here, so every prevalence is 0.
    let data = dataset(vec![quiet_record("c-1", 1), quiet_record("c-2", 0)]);

    for signal in signal_effectiveness(&data) {
        assert_eq!(signal.prevalence, 0);
        assert_eq!(signal.delinquency_rate_when_present, 0.0);
        assert_eq!(signal.risk_lift, 1.0);
    }
}

#[test]
fn portfolio_tier_counts_sum_to_total() {
    let data = dataset(vec![
        stressed_record("c-1", 1),
        record("c-2", 85.0, 50.0, 20.0, 0.8, 2.0, 5.0, 0),
        quiet_record("c-3", 0),
        quiet_record("c-4", 1),
        record("c-5", 75.0, 85.0, 90.0, 0.3, 20.0, -12.0, 2),
    ]);

    let summary = portfolio_summary(&data);
    let breakdown = summary.tier_breakdown;
    assert_eq!(
        breakdown.high + breakdown.medium + breakdown.low,
        summary.total_customers
    );
    assert_eq!(summary.total_customers, 5);
    assert_eq!(summary.total_delinquent, 3);
    assert_eq!(summary.delinquency_rate, 60.0);

    let health_total: usize = summary.tier_health.iter().map(|tier| tier.count).sum();
    assert_eq!(health_total, summary.total_customers);
}

#[test]
fn score_histogram_always_has_six_buckets() {
    let data = dataset(vec![quiet_record("c-1", 0), stressed_record("c-2", 1)]);

    let distribution = risk_distribution(&data);
    let histogram = &distribution.risk_score_distribution;
    assert_eq!(histogram.len(), 6);
    assert_eq!(histogram[0].score, 0);
    assert_eq!(histogram[5].score, 5);

    let counted: usize = histogram.iter().map(|bucket| bucket.count).sum();
    assert_eq!(counted, data.len());

    // Scores 1 through 4 are empty for this dataset and must still appear.
    for bucket in &histogram[1..5] {
        assert_eq!(bucket.count, 0);
    }
}

#[test]
fn tier_distribution_reports_field_averages() {
    let data = dataset(vec![stressed_record("c-1", 1), stressed_record("c-2", 0)]);

    let distribution = risk_distribution(&data);
    let high = distribution
        .tier_distribution
        .iter()
        .find(|tier| tier.tier == RiskTier::High)
        .expect("high tier present");

    assert_eq!(high.count, 2);
    assert_eq!(high.percentage, 100.0);
    assert_eq!(high.delinquency_rate, 50.0);
    assert_eq!(high.avg_utilization, 85.0);
    assert_eq!(high.avg_payment_ratio, 35.0);
    assert_eq!(high.avg_min_due_paid_freq, 10.0);
    assert_eq!(high.avg_merchant_mix, 0.2);
    assert_eq!(high.avg_cash_withdrawal, 20.0);
    assert_eq!(high.avg_spend_change, -15.0);
}

#[test]
fn empty_portfolio_produces_zeroed_summary() {
    let data = dataset(Vec::new());

    let summary = portfolio_summary(&data);
    assert_eq!(summary.total_customers, 0);
    assert_eq!(summary.total_delinquent, 0);
    assert_eq!(summary.delinquency_rate, 0.0);

    for signal in signal_effectiveness(&data) {
        assert_eq!(signal.prevalence_pct, 0.0);
        assert_eq!(signal.risk_lift, 1.0);
    }
}
