//! Deal table generation.
//!
//! Iterates the customer table; each customer gets
//! min(Poisson(1.5) + 1, 5) deals. Deal size follows a
//! segment-dependent normal and is deliberately left unclamped —
//! rare tail draws below zero are part of the model.

use crate::{
    clock::DatasetClock,
    customer_gen::{CustomerRecord, CustomerStatus},
    error::{GenError, GenResult},
    rng::StreamRng,
    types::{CustomerId, DealId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_DEALS_PER_CUSTOMER: u64 = 5;

const DEAL_KINDS: [&str; 5] = ["License", "Subscription", "Implementation", "Upgrade", "Renewal"];
const PRODUCTS: [&str; 6] = [
    "CRM Platform", "Analytics Suite", "Integration Package",
    "Premium Support", "Custom Development", "Training Services",
];
const SOURCES: [&str; 6] = [
    "Inbound Lead", "Referral", "Cold Outreach", "Marketing Campaign",
    "Existing Customer", "Partner",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    /// Pipeline order, earliest first. Stage weight vectors index
    /// into this array and must keep its length.
    pub const ALL: [DealStage; 6] = [
        Self::Prospecting,
        Self::Qualification,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prospecting => "Prospecting",
            Self::Qualification => "Qualification",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealRecord {
    pub deal_id: DealId,
    pub customer_id: CustomerId,
    pub name: String,
    pub size: f64,
    pub stage: DealStage,
    pub close_probability: f64,
    pub expected_close_date: NaiveDate,
    pub created_date: NaiveDate,
    pub owner: String,
    pub product: String,
    pub source: String,
}

/// Generate the deal table for an already-generated customer table.
pub fn generate_deals(
    customers: &[CustomerRecord],
    clock: &DatasetClock,
    rng: &mut StreamRng,
) -> GenResult<Vec<DealRecord>> {
    if customers.is_empty() {
        return Err(GenError::EmptyInput { table: "customers" });
    }

    let mut deals = Vec::new();
    for customer in customers {
        let count = (rng.poisson(1.5) + 1).min(MAX_DEALS_PER_CUSTOMER);
        let stage_weights = stage_weights_for(customer.status);

        for seq in 1..=count {
            let stage = DealStage::ALL[rng.weighted_index(stage_weights)];
            deals.push(DealRecord {
                deal_id: format!("DEAL_{}_{seq}", customer.customer_id),
                customer_id: customer.customer_id.clone(),
                name: format!("{} - {}", customer.company, rng.pick(&DEAL_KINDS)),
                size: deal_size_for(&customer.segment, rng),
                stage,
                close_probability: close_probability_for(stage, rng),
                expected_close_date: expected_close_date_for(stage, clock, rng),
                created_date: clock.date_between(rng, -365, 0),
                owner: customer.account_manager.clone(),
                product: rng.pick(&PRODUCTS).to_string(),
                source: rng.pick(&SOURCES).to_string(),
            });
        }
    }

    Ok(deals)
}

/// Segment-dependent normal draw. Unknown segments fall through to
/// the SMB parameters, matching the sentiment-offset fallback.
fn deal_size_for(segment: &str, rng: &mut StreamRng) -> f64 {
    let (mean, std_dev) = match segment {
        "Enterprise" => (150_000.0, 50_000.0),
        "Mid-Market" => (50_000.0, 15_000.0),
        _ => (15_000.0, 5_000.0),
    };
    rng.normal(mean, std_dev)
}

/// Stage weight vector selected by customer status. Indexed in
/// DealStage::ALL order.
fn stage_weights_for(status: CustomerStatus) -> &'static [f64; 6] {
    match status {
        CustomerStatus::Churned => &[0.10, 0.10, 0.10, 0.10, 0.10, 0.50],
        CustomerStatus::Inactive => &[0.30, 0.20, 0.20, 0.10, 0.10, 0.10],
        CustomerStatus::Active => &[0.20, 0.25, 0.20, 0.15, 0.15, 0.05],
    }
}

/// Closed stages are exact by contract; open stages draw a
/// stage-keyed uniform range.
fn close_probability_for(stage: DealStage, rng: &mut StreamRng) -> f64 {
    match stage {
        DealStage::Prospecting => rng.uniform(0.1, 0.3),
        DealStage::Qualification => rng.uniform(0.2, 0.4),
        DealStage::Proposal => rng.uniform(0.4, 0.6),
        DealStage::Negotiation => rng.uniform(0.6, 0.8),
        DealStage::ClosedWon => 1.0,
        DealStage::ClosedLost => 0.0,
    }
}

fn expected_close_date_for(stage: DealStage, clock: &DatasetClock, rng: &mut StreamRng) -> NaiveDate {
    if stage.is_open() {
        let days_ahead = match stage {
            DealStage::Prospecting => 90,
            DealStage::Qualification => 60,
            DealStage::Proposal => 30,
            DealStage::Negotiation => 15,
            _ => 45,
        };
        clock.date_between(rng, 0, days_ahead)
    } else {
        clock.date_between(rng, -90, 0)
    }
}
