//! Early behavioral risk signals for credit-card delinquency.
//!
//! The crate derives deterministic boolean signals from raw account activity,
//! aggregates them into a composite risk score and tier, measures each
//! signal's statistical association with delinquency, and simulates the
//! financial return of tier-based interventions. A thin axum router exposes
//! the analytics over HTTP; process wiring lives in the `services/api` crate.

pub mod config;
pub mod error;
pub mod risk;
pub mod telemetry;
