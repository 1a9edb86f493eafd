//! Signal engine: fixed boolean formulas over one customer's raw fields.

use super::domain::{CustomerRecord, SignalSet};
use super::thresholds::SignalThresholds;

/// Stateless evaluator deriving the five behavioral signals from a record.
///
/// Each signal is a pure inequality formula against the configured
/// thresholds; evaluation never fails for finite numeric input (the dataset
/// and request boundaries reject non-finite values before they reach here).
pub struct SignalEngine;

impl SignalEngine {
    pub fn evaluate(record: &CustomerRecord, thresholds: &SignalThresholds) -> SignalSet {
        let spend_decline = record.spend_change_pct < thresholds.spend_decline_pct;

        let high_utilization = record.utilization_pct > thresholds.utilization_high_pct
            || (record.utilization_pct > thresholds.utilization_medium_pct
                && record.cash_withdrawal_pct > thresholds.cash_withdrawal_pct);

        let payment_decline = record.payment_ratio < thresholds.payment_ratio_high
            || (record.payment_ratio < thresholds.payment_ratio_medium
                && record.min_due_paid_freq < thresholds.min_due_paid_freq);

        let cash_surge = record.cash_withdrawal_pct > thresholds.cash_withdrawal_pct;

        let low_merchant_mix = record.merchant_mix_index < thresholds.merchant_mix_index;

        SignalSet {
            spend_decline,
            high_utilization,
            payment_decline,
            cash_surge,
            low_merchant_mix,
        }
    }
}
