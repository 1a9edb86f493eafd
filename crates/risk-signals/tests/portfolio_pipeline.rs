//! Integration coverage for the portfolio pipeline: CSV ingestion,
//! wholesale enrichment, analytics, and model training through the crate's
//! public API only.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use risk_signals::risk::{
    load_from_path, load_records, DatasetError, EnrichedDataset, InterventionEconomics,
    LogisticModel, ProbabilityEstimator, RiskContext, RiskTier, SignalThresholds, TierCutoffs,
};

const HEADER: &str = "Customer ID,Utilisation %,Avg Payment Ratio,Min Due Paid Frequency,Merchant Mix Index,Cash Withdrawal %,Recent Spend Change %,Credit Limit,DPD Bucket Next Month";

fn sample_csv() -> String {
    let rows = [
        HEADER,
        "CUST-001,85,35,10,0.2,20,-15,50000,2",
        "CUST-002,30,85,90,0.8,2,5,80000,0",
        "CUST-003,75,50,20,0.3,20,-12,40000,1",
        "CUST-004,85,85,90,0.8,2,5,60000,0",
        "CUST-005,30,85,90,0.8,2,5,70000,0",
    ];
    rows.join("\n")
}

fn build_context(csv: &str) -> RiskContext {
    let records = load_records(Cursor::new(csv.as_bytes().to_vec())).expect("csv parses");
    let dataset = EnrichedDataset::build(
        records,
        &SignalThresholds::default(),
        &TierCutoffs::default(),
    );
    let model: Option<Arc<dyn ProbabilityEstimator>> = LogisticModel::train(&dataset)
        .ok()
        .map(|model| Arc::new(model) as Arc<dyn ProbabilityEstimator>);
    RiskContext::new(
        dataset,
        SignalThresholds::default(),
        TierCutoffs::default(),
        InterventionEconomics::default(),
        model,
    )
}

#[test]
fn csv_rows_flow_through_enrichment_into_the_summary() {
    let context = build_context(&sample_csv());

    let summary = context.portfolio_summary();
    assert_eq!(summary.total_customers, 5);
    assert_eq!(summary.total_delinquent, 2);

    let breakdown = summary.tier_breakdown;
    assert_eq!(
        breakdown.high + breakdown.medium + breakdown.low,
        summary.total_customers
    );

    // CUST-001 fires all five signals and must land in HIGH.
    let high_members: Vec<_> = context
        .customers(Some(RiskTier::High), 100)
        .into_iter()
        .map(|view| view.customer_id.0)
        .collect();
    assert!(high_members.contains(&"CUST-001".to_string()));
}

#[test]
fn signal_effectiveness_orders_by_lift_over_the_loaded_portfolio() {
    let context = build_context(&sample_csv());

    let signals = context.signal_effectiveness();
    assert_eq!(signals.len(), 5);
    for pair in signals.windows(2) {
        assert!(pair[0].risk_lift >= pair[1].risk_lift);
        assert!(pair[0].risk_lift.is_finite());
    }
}

#[test]
fn roi_reflects_the_enriched_partition() {
    let context = build_context(&sample_csv());

    let analysis = context.calculate_roi();
    assert!(analysis.program_cost.total > 0.0);
    assert_eq!(
        analysis.program_cost.total,
        analysis.program_cost.high_tier
            + analysis.program_cost.medium_tier
            + analysis.program_cost.low_tier
    );
    assert!(analysis.roi_percentage.is_finite());
}

#[test]
fn trained_model_ranks_stressed_customers_above_quiet_ones() {
    let mut rows = vec![HEADER.to_string()];
    // Separable data: stressed rows delinquent, quiet rows current.
    for index in 0..20 {
        rows.push(format!(
            "S-{index},85,35,10,0.2,20,-15,50000,1"
        ));
        rows.push(format!(
            "Q-{index},30,85,90,0.8,2,5,50000,0"
        ));
    }
    let csv = rows.join("\n");

    let records = load_records(Cursor::new(csv.into_bytes())).expect("csv parses");
    let dataset = EnrichedDataset::build(
        records,
        &SignalThresholds::default(),
        &TierCutoffs::default(),
    );
    let model = LogisticModel::train(&dataset).expect("model trains");

    let stressed = risk_signals::risk::feature_vector(
        [85.0, 35.0, 10.0, 0.2, 20.0, -15.0],
        &risk_signals::risk::SignalSet {
            spend_decline: true,
            high_utilization: true,
            payment_decline: true,
            cash_surge: true,
            low_merchant_mix: true,
        },
    );
    let quiet = risk_signals::risk::feature_vector(
        [30.0, 85.0, 90.0, 0.8, 2.0, 5.0],
        &risk_signals::risk::SignalSet::default(),
    );

    let p_stressed = model.predict_proba(&stressed);
    let p_quiet = model.predict_proba(&quiet);
    assert!((0.0..=1.0).contains(&p_stressed));
    assert!((0.0..=1.0).contains(&p_quiet));
    assert!(p_stressed > p_quiet);

    let importance = model.feature_importance();
    assert_eq!(importance.len(), 11);
    for pair in importance.windows(2) {
        assert!(pair[0].importance >= pair[1].importance);
    }
}

#[test]
fn malformed_rows_are_reported_with_their_line_number() {
    let csv = format!("{HEADER}\nCUST-001,not-a-number,35,10,0.2,20,-15,50000,2");

    match load_records(Cursor::new(csv.into_bytes())) {
        Err(DatasetError::MalformedRecord { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected malformed record error, got {other:?}"),
    }
}

#[test]
fn ragged_rows_are_reported_as_malformed_records() {
    // Row 2 is short two columns, so the error comes from the reader rather
    // than field deserialization. Both surface the same way.
    let csv = format!("{HEADER}\nCUST-001,85,35,10,0.2,20,-15");

    match load_records(Cursor::new(csv.into_bytes())) {
        Err(DatasetError::MalformedRecord { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected malformed record error, got {other:?}"),
    }
}

#[test]
fn missing_data_file_is_a_reported_startup_failure() {
    match load_from_path(Path::new("/definitely/not/here.csv")) {
        Err(DatasetError::Missing { path }) => {
            assert_eq!(path, Path::new("/definitely/not/here.csv"));
        }
        other => panic!("expected missing file error, got {other:?}"),
    }
}

#[test]
fn model_training_requires_enough_records() {
    let dataset = EnrichedDataset::build(
        Vec::new(),
        &SignalThresholds::default(),
        &TierCutoffs::default(),
    );
    assert!(LogisticModel::train(&dataset).is_err());
}
