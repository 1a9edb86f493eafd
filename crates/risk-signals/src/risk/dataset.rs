//! Dataset loading and wholesale enrichment.
//!
//! The bulk portfolio flows through here exactly once at startup: CSV rows
//! become [`CustomerRecord`]s, then [`EnrichedDataset::build`] derives the
//! delinquency label, signals, score, and tier for every record. The result
//! is immutable; any change to the source data means rebuilding from scratch.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use super::domain::{CustomerId, CustomerRecord, EnrichedCustomer, RiskTier};
use super::signals::SignalEngine;
use super::thresholds::{SignalThresholds, TierCutoffs};

/// Failure loading or parsing the customer activity dataset. Fatal for the
/// analytics surface at startup: reported once, never retried.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("data file not found at {path}")]
    Missing { path: PathBuf },
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct ActivityRow {
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Utilisation %")]
    utilization_pct: f64,
    #[serde(rename = "Avg Payment Ratio")]
    payment_ratio: f64,
    #[serde(rename = "Min Due Paid Frequency")]
    min_due_paid_freq: f64,
    #[serde(rename = "Merchant Mix Index")]
    merchant_mix_index: f64,
    #[serde(rename = "Cash Withdrawal %")]
    cash_withdrawal_pct: f64,
    #[serde(rename = "Recent Spend Change %")]
    spend_change_pct: f64,
    #[serde(rename = "Credit Limit")]
    credit_limit: u32,
    #[serde(rename = "DPD Bucket Next Month")]
    dpd_bucket_next_month: u8,
}

impl ActivityRow {
    fn into_record(self, row: usize) -> Result<CustomerRecord, DatasetError> {
        let fields = [
            ("Utilisation %", self.utilization_pct),
            ("Avg Payment Ratio", self.payment_ratio),
            ("Min Due Paid Frequency", self.min_due_paid_freq),
            ("Merchant Mix Index", self.merchant_mix_index),
            ("Cash Withdrawal %", self.cash_withdrawal_pct),
            ("Recent Spend Change %", self.spend_change_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(DatasetError::MalformedRecord {
                    row,
                    reason: format!("'{name}' is not a finite number"),
                });
            }
        }

        Ok(CustomerRecord {
            customer_id: CustomerId(self.customer_id),
            utilization_pct: self.utilization_pct,
            payment_ratio: self.payment_ratio,
            min_due_paid_freq: self.min_due_paid_freq,
            merchant_mix_index: self.merchant_mix_index,
            cash_withdrawal_pct: self.cash_withdrawal_pct,
            spend_change_pct: self.spend_change_pct,
            credit_limit: self.credit_limit,
            dpd_bucket_next_month: self.dpd_bucket_next_month,
        })
    }
}

/// Parse customer records from any CSV reader.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<CustomerRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<ActivityRow>().enumerate() {
        // Header occupies line 1; data rows are 1-indexed after it.
        let row_number = index + 2;
        let row = row.map_err(|err| DatasetError::MalformedRecord {
            row: row_number,
            reason: err.to_string(),
        })?;
        records.push(row.into_record(row_number)?);
    }

    debug!(records = records.len(), "customer activity rows parsed");
    Ok(records)
}

/// Load customer records from the configured CSV path.
pub fn load_from_path(path: &Path) -> Result<Vec<CustomerRecord>, DatasetError> {
    info!(path = %path.display(), "loading customer activity dataset");
    if !path.exists() {
        return Err(DatasetError::Missing {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    load_records(file)
}

/// The portfolio after signal engineering: records plus derived columns.
/// Read-only to every downstream consumer.
#[derive(Debug, Clone, Default)]
pub struct EnrichedDataset {
    customers: Vec<EnrichedCustomer>,
}

impl EnrichedDataset {
    /// Derive label, signals, score, and tier for every record. Deterministic
    /// and idempotent: the same raw input always yields the same output.
    pub fn build(
        records: Vec<CustomerRecord>,
        thresholds: &SignalThresholds,
        cutoffs: &TierCutoffs,
    ) -> Self {
        let customers = records
            .into_iter()
            .map(|record| {
                let is_delinquent = record.dpd_bucket_next_month > 0;
                let signals = SignalEngine::evaluate(&record, thresholds);
                let risk_score = signals.active_count();
                let tier = cutoffs.classify(risk_score);
                EnrichedCustomer {
                    record,
                    signals,
                    risk_score,
                    tier,
                    is_delinquent,
                }
            })
            .collect();

        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnrichedCustomer> {
        self.customers.iter()
    }

    pub fn tier_members(&self, tier: RiskTier) -> impl Iterator<Item = &EnrichedCustomer> {
        self.customers
            .iter()
            .filter(move |customer| customer.tier == tier)
    }
}
