use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for customers in the loaded portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One row of raw account activity. Immutable once loaded; the engine only
/// ever appends derived fields, never rewrites these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub utilization_pct: f64,
    pub payment_ratio: f64,
    pub min_due_paid_freq: f64,
    pub merchant_mix_index: f64,
    pub cash_withdrawal_pct: f64,
    pub spend_change_pct: f64,
    pub credit_limit: u32,
    pub dpd_bucket_next_month: u8,
}

impl CustomerRecord {
    /// The six continuous behavioral fields in model feature order.
    pub fn continuous_features(&self) -> [f64; 6] {
        [
            self.utilization_pct,
            self.payment_ratio,
            self.min_due_paid_freq,
            self.merchant_mix_index,
            self.cash_withdrawal_pct,
            self.spend_change_pct,
        ]
    }
}

/// The five behavioral signals tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    SpendDecline,
    HighUtilization,
    PaymentDecline,
    CashSurge,
    LowMerchantMix,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::SpendDecline,
        SignalKind::HighUtilization,
        SignalKind::PaymentDecline,
        SignalKind::CashSurge,
        SignalKind::LowMerchantMix,
    ];

    /// Stable column code used in payloads and feature names.
    pub fn code(&self) -> &'static str {
        match self {
            SignalKind::SpendDecline => "signal_spend_decline",
            SignalKind::HighUtilization => "signal_high_utilization",
            SignalKind::PaymentDecline => "signal_payment_decline",
            SignalKind::CashSurge => "signal_cash_surge",
            SignalKind::LowMerchantMix => "signal_low_merchant_mix",
        }
    }

    /// Human-readable name surfaced in scoring responses and dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::SpendDecline => "Spending Decline",
            SignalKind::HighUtilization => "High Utilization",
            SignalKind::PaymentDecline => "Payment Decline",
            SignalKind::CashSurge => "Cash Surge",
            SignalKind::LowMerchantMix => "Low Merchant Mix",
        }
    }
}

/// Boolean signal values derived for one customer record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    #[serde(default)]
    pub spend_decline: bool,
    #[serde(default)]
    pub high_utilization: bool,
    #[serde(default)]
    pub payment_decline: bool,
    #[serde(default)]
    pub cash_surge: bool,
    #[serde(default)]
    pub low_merchant_mix: bool,
}

impl SignalSet {
    pub fn get(&self, kind: SignalKind) -> bool {
        match kind {
            SignalKind::SpendDecline => self.spend_decline,
            SignalKind::HighUtilization => self.high_utilization,
            SignalKind::PaymentDecline => self.payment_decline,
            SignalKind::CashSurge => self.cash_surge,
            SignalKind::LowMerchantMix => self.low_merchant_mix,
        }
    }

    /// Composite risk score: the count of active signals, 0 through 5.
    pub fn active_count(&self) -> u8 {
        SignalKind::ALL
            .iter()
            .filter(|kind| self.get(**kind))
            .count() as u8
    }

    /// Labels of the triggered signals, in canonical signal order.
    pub fn triggered_labels(&self) -> Vec<&'static str> {
        SignalKind::ALL
            .iter()
            .filter(|kind| self.get(**kind))
            .map(|kind| kind.label())
            .collect()
    }

    /// The five flags as 0/1 features, in canonical signal order.
    pub fn as_features(&self) -> [f64; 5] {
        let mut features = [0.0; 5];
        for (slot, kind) in features.iter_mut().zip(SignalKind::ALL) {
            *slot = if self.get(kind) { 1.0 } else { 0.0 };
        }
        features
    }
}

/// Risk tier classification of a composite score against configured cut
/// points. Ordering is LOW < MEDIUM < HIGH so tier comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "HIGH",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskTier {
    type Err = UnknownTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(RiskTier::High),
            "MEDIUM" => Ok(RiskTier::Medium),
            "LOW" => Ok(RiskTier::Low),
            _ => Err(UnknownTier {
                value: value.to_string(),
            }),
        }
    }
}

/// Raised when a caller names a tier outside HIGH/MEDIUM/LOW.
#[derive(Debug, thiserror::Error)]
#[error("unknown risk tier '{value}' (expected HIGH, MEDIUM, or LOW)")]
pub struct UnknownTier {
    pub value: String,
}

/// A customer record extended with its derived signals, score, tier, and
/// delinquency label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCustomer {
    pub record: CustomerRecord,
    pub signals: SignalSet,
    pub risk_score: u8,
    pub tier: RiskTier,
    pub is_delinquent: bool,
}

/// Sanitized customer row exposed by the `customers` listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummaryView {
    pub customer_id: CustomerId,
    pub risk_tier: RiskTier,
    pub risk_score: u8,
    pub utilization: f64,
    pub payment_ratio: f64,
    pub spend_change: f64,
    pub is_delinquent: bool,
    pub credit_limit: u32,
}

impl EnrichedCustomer {
    pub fn summary_view(&self) -> CustomerSummaryView {
        CustomerSummaryView {
            customer_id: self.record.customer_id.clone(),
            risk_tier: self.tier,
            risk_score: self.risk_score,
            utilization: crate::risk::round1(self.record.utilization_pct),
            payment_ratio: crate::risk::round1(self.record.payment_ratio),
            spend_change: crate::risk::round1(self.record.spend_change_pct),
            is_delinquent: self.is_delinquent,
            credit_limit: self.record.credit_limit,
        }
    }
}
