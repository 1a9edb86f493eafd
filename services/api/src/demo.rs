use clap::Args;
use risk_signals::error::AppError;
use risk_signals::risk::{
    calculate_roi, load_from_path, portfolio_summary, risk_distribution, signal_effectiveness,
    EnrichedDataset, InterventionEconomics, SignalThresholds, TierCutoffs,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PortfolioReportArgs {
    /// Customer activity CSV export to analyze
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Number of top signals to print
    #[arg(long, default_value_t = 5)]
    pub(crate) top_signals: usize,
    /// Skip the intervention ROI section
    #[arg(long)]
    pub(crate) skip_roi: bool,
}

pub(crate) fn run_portfolio_report(args: PortfolioReportArgs) -> Result<(), AppError> {
    let PortfolioReportArgs {
        csv,
        top_signals,
        skip_roi,
    } = args;

    let records = load_from_path(&csv)?;
    let dataset = EnrichedDataset::build(
        records,
        &SignalThresholds::default(),
        &TierCutoffs::default(),
    );

    let summary = portfolio_summary(&dataset);
    println!("Portfolio risk report ({})", csv.display());
    println!(
        "  customers: {}  delinquent: {} ({}%)",
        summary.total_customers, summary.total_delinquent, summary.delinquency_rate
    );
    for tier in &summary.tier_health {
        println!(
            "  {:<6} {:>6} customers, delinquency {}%",
            tier.tier, tier.count, tier.delinquency_rate
        );
    }

    let distribution = risk_distribution(&dataset);
    println!("\nRisk score distribution");
    for bucket in &distribution.risk_score_distribution {
        println!("  score {}: {}", bucket.score, bucket.count);
    }

    println!("\nTop signals by lift");
    for signal in signal_effectiveness(&dataset).into_iter().take(top_signals) {
        println!(
            "  {:<20} lift {:>5}  prevalence {}%",
            signal.name, signal.risk_lift, signal.prevalence_pct
        );
    }

    if !skip_roi {
        let roi = calculate_roi(&dataset, &InterventionEconomics::default());
        println!("\nIntervention ROI");
        println!("  program cost: ${:.2}", roi.program_cost.total);
        println!("  prevented defaults: {}", roi.prevented_defaults);
        println!("  revenue protected: ${:.2}", roi.revenue_protected);
        println!("  net benefit: ${:.2}", roi.net_benefit);
        println!("  roi: {}%", roi.roi_percentage);
    }

    Ok(())
}
