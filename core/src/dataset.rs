//! Dataset generation — the batch entry point.
//!
//! Builds Customers first, then Deals and Feedback keyed off the
//! customer table, then summary statistics, as one atomic batch.
//! All randomness flows through the RngBank; two generators built
//! with the same seed and params produce byte-identical batches.

use crate::{
    clock::DatasetClock,
    customer_gen::{generate_customers, CustomerRecord},
    deal_gen::{generate_deals, DealRecord, DealStage},
    error::GenResult,
    feedback_gen::{generate_feedback, ChurnRisk, FeedbackRecord},
    params::GeneratorParams,
    rng::{RngBank, TableSlot},
    stats::{group_by, mean, round_to},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One generated batch: three related tables plus summary statistics.
/// Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub deals: Vec<DealRecord>,
    pub feedback: Vec<FeedbackRecord>,
    pub summary: SummaryStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_customers: usize,
    pub total_deals: usize,
    pub total_feedback: usize,
    pub avg_sentiment: f64,
    pub churn_risk_high: usize,
    pub churn_risk_percent: f64,
    pub total_pipeline: f64,
    pub won_deals: usize,
    pub lost_deals: usize,
    pub regions: BTreeMap<String, usize>,
    pub segments: BTreeMap<String, usize>,
    pub sentiment_by_region: BTreeMap<String, f64>,
    pub sentiment_by_segment: BTreeMap<String, f64>,
}

pub struct DatasetGenerator {
    params: GeneratorParams,
    clock: DatasetClock,
    bank: RngBank,
}

impl DatasetGenerator {
    /// Seed the bank once at construction. Repeated generate() calls
    /// on the same instance (or any instance with the same seed and
    /// params) reproduce the same batch.
    pub fn new(params: GeneratorParams, seed: u64) -> Self {
        Self::with_clock(params, seed, DatasetClock::system())
    }

    /// Pin "today" — used by tests so date windows are exact.
    pub fn with_clock(params: GeneratorParams, seed: u64, clock: DatasetClock) -> Self {
        Self { params, clock, bank: RngBank::new(seed) }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate the complete batch. Validation runs before any table
    /// is built; a failed batch leaves nothing behind.
    pub fn generate(&self) -> GenResult<Dataset> {
        self.params.validate()?;

        let mut customer_rng = self.bank.for_table(TableSlot::Customer);
        let customers = generate_customers(&self.params, &self.clock, &mut customer_rng)?;
        log::info!("generated {} customers", customers.len());

        let mut deal_rng = self.bank.for_table(TableSlot::Deal);
        let deals = generate_deals(&customers, &self.clock, &mut deal_rng)?;
        log::info!("generated {} deals", deals.len());

        let mut feedback_rng = self.bank.for_table(TableSlot::Feedback);
        let feedback = generate_feedback(&customers, &self.clock, &mut feedback_rng)?;
        log::info!("generated {} feedback entries", feedback.len());

        let summary = compute_summary(&customers, &deals, &feedback);

        Ok(Dataset { customers, deals, feedback, summary })
    }
}

pub fn compute_summary(
    customers: &[CustomerRecord],
    deals: &[DealRecord],
    feedback: &[FeedbackRecord],
) -> SummaryStats {
    let sentiment: Vec<f64> = feedback.iter().map(|f| f.sentiment_score).collect();
    let high_risk = feedback.iter().filter(|f| f.churn_risk == ChurnRisk::High).count();
    let churn_risk_percent = if feedback.is_empty() {
        0.0
    } else {
        round_to(high_risk as f64 / feedback.len() as f64 * 100.0, 1)
    };

    let total_pipeline: f64 = deals
        .iter()
        .filter(|d| d.stage.is_open())
        .map(|d| d.size)
        .sum();

    let mut regions = BTreeMap::new();
    let mut segments = BTreeMap::new();
    for c in customers {
        *regions.entry(c.region.clone()).or_insert(0) += 1;
        *segments.entry(c.segment.clone()).or_insert(0) += 1;
    }

    let sentiment_by_region = grouped_mean_sentiment(feedback, |f| f.region.clone());
    let sentiment_by_segment = grouped_mean_sentiment(feedback, |f| f.segment.clone());

    SummaryStats {
        total_customers: customers.len(),
        total_deals: deals.len(),
        total_feedback: feedback.len(),
        avg_sentiment: round_to(mean(&sentiment), 3),
        churn_risk_high: high_risk,
        churn_risk_percent,
        total_pipeline: round_to(total_pipeline, 0),
        won_deals: deals.iter().filter(|d| d.stage == DealStage::ClosedWon).count(),
        lost_deals: deals.iter().filter(|d| d.stage == DealStage::ClosedLost).count(),
        regions,
        segments,
        sentiment_by_region,
        sentiment_by_segment,
    }
}

fn grouped_mean_sentiment<F>(feedback: &[FeedbackRecord], key: F) -> BTreeMap<String, f64>
where
    F: Fn(&FeedbackRecord) -> String,
{
    group_by(feedback, key)
        .into_iter()
        .map(|(k, rows)| {
            let scores: Vec<f64> = rows.iter().map(|f| f.sentiment_score).collect();
            (k, round_to(mean(&scores), 3))
        })
        .collect()
}
