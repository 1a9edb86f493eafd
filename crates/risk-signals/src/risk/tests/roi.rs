use super::common::*;
use crate::risk::roi::calculate_roi;
use crate::risk::thresholds::InterventionEconomics;

#[test]
fn roi_matches_hand_computed_example() {
    // Two HIGH-tier customers, one delinquent; no other tiers populated.
    let data = dataset(vec![stressed_record("c-1", 1), stressed_record("c-2", 0)]);
    let economics = InterventionEconomics::default();

    let analysis = calculate_roi(&data, &economics);

    // prevented = 2 * 0.40 * 0.5 = 0.4; cost = 2 * 20 = 40
    assert_eq!(analysis.program_cost.high_tier, 40.0);
    assert_eq!(analysis.program_cost.medium_tier, 0.0);
    assert_eq!(analysis.program_cost.low_tier, 0.0);
    assert_eq!(analysis.program_cost.total, 40.0);
    assert_eq!(analysis.prevented_defaults, 0.4);
    assert_eq!(analysis.revenue_protected, 2000.0);
    assert_eq!(analysis.net_benefit, 1960.0);
    assert_eq!(analysis.roi_percentage, 4900.0);
    assert_eq!(analysis.per_dollar_yield, 50.0);
}

#[test]
fn empty_tiers_contribute_zero_without_erroring() {
    // Only LOW-tier customers; HIGH and MEDIUM are empty.
    let data = dataset(vec![quiet_record("c-1", 1), quiet_record("c-2", 0)]);
    let economics = InterventionEconomics::default();

    let analysis = calculate_roi(&data, &economics);

    assert_eq!(analysis.program_cost.high_tier, 0.0);
    assert_eq!(analysis.program_cost.medium_tier, 0.0);
    assert_eq!(analysis.program_cost.low_tier, 1.0);
    // prevented = 2 * 0.07 * 0.5 = 0.07 -> rounds to 0.1
    assert_eq!(analysis.prevented_defaults, 0.1);
    assert!(analysis.revenue_protected > 0.0);
    assert!(analysis.roi_percentage.is_finite());
}

#[test]
fn zero_cost_defines_ratios_as_zero() {
    let data = dataset(Vec::new());
    let economics = InterventionEconomics::default();

    let analysis = calculate_roi(&data, &economics);

    assert_eq!(analysis.program_cost.total, 0.0);
    assert_eq!(analysis.revenue_protected, 0.0);
    assert_eq!(analysis.net_benefit, 0.0);
    assert_eq!(analysis.roi_percentage, 0.0);
    assert_eq!(analysis.per_dollar_yield, 0.0);
}

#[test]
fn free_interventions_still_guard_the_ratio() {
    let data = dataset(vec![quiet_record("c-1", 1)]);
    let economics = InterventionEconomics {
        high_unit_cost: 0.0,
        medium_unit_cost: 0.0,
        low_unit_cost: 0.0,
        ..InterventionEconomics::default()
    };

    let analysis = calculate_roi(&data, &economics);

    assert_eq!(analysis.program_cost.total, 0.0);
    assert!(analysis.revenue_protected > 0.0);
    assert_eq!(analysis.roi_percentage, 0.0);
    assert_eq!(analysis.per_dollar_yield, 0.0);
}
