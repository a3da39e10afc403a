//! Feedback table generation.
//!
//! Iterates the customer table; each customer gets
//! min(Poisson(2) + 1, 8) entries. Sentiment is a clipped Gaussian
//! around status/segment offsets; churn risk is an additive score
//! with a Churned short-circuit; text comes from the template tables.
//! Region and segment are denormalized from the owning customer.

use crate::{
    clock::DatasetClock,
    customer_gen::{CustomerRecord, CustomerStatus},
    error::{GenError, GenResult},
    rng::StreamRng,
    stats::round_to,
    templates::render_feedback_text,
    types::{CustomerId, FeedbackId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_FEEDBACK_PER_CUSTOMER: u64 = 8;

const CHANNELS: [&str; 6] = ["Email", "Phone", "Survey", "Chat", "Social Media", "Support Ticket"];
const CATEGORIES: [&str; 8] = [
    "Product Quality", "Customer Service", "Pricing", "Features",
    "Performance", "Support", "Implementation", "Training",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Label thresholds sit exactly at ±0.2; scores on the boundary
    /// are Neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.2 {
            Self::Positive
        } else if score < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnRisk {
    Low,
    Medium,
    High,
}

impl ChurnRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub feedback_id: FeedbackId,
    pub customer_id: CustomerId,
    pub text: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub churn_risk: ChurnRisk,
    pub date: NaiveDate,
    pub channel: String,
    pub category: String,
    pub region: String,
    pub segment: String,
    pub resolved: bool,
    pub response_time_hours: f64,
}

/// Generate the feedback table for an already-generated customer table.
pub fn generate_feedback(
    customers: &[CustomerRecord],
    clock: &DatasetClock,
    rng: &mut StreamRng,
) -> GenResult<Vec<FeedbackRecord>> {
    if customers.is_empty() {
        return Err(GenError::EmptyInput { table: "customers" });
    }

    let mut feedback = Vec::new();
    for customer in customers {
        let count = (rng.poisson(2.0) + 1).min(MAX_FEEDBACK_PER_CUSTOMER);

        for seq in 1..=count {
            let score = sample_sentiment(customer, rng);
            let response_mean = if score < 0.0 { 24.0 } else { 12.0 };

            feedback.push(FeedbackRecord {
                feedback_id: format!("FB_{}_{seq}", customer.customer_id),
                customer_id: customer.customer_id.clone(),
                text: render_feedback_text(score, rng),
                sentiment_score: score,
                sentiment_label: SentimentLabel::from_score(score),
                churn_risk: churn_risk_for(score, customer, rng),
                date: clock.date_between(rng, -180, 0),
                channel: rng.pick(&CHANNELS).to_string(),
                category: rng.pick(&CATEGORIES).to_string(),
                region: customer.region.clone(),
                segment: customer.segment.clone(),
                resolved: rng.chance(0.8),
                response_time_hours: rng.exponential(response_mean),
            });
        }
    }

    Ok(feedback)
}

/// Base offsets combine additively: status pulls hardest, segment
/// nudges. Clipped to [-1, 1] and rounded to 3 decimals.
fn sample_sentiment(customer: &CustomerRecord, rng: &mut StreamRng) -> f64 {
    let mut base = 0.0;
    match customer.status {
        CustomerStatus::Churned => base -= 0.5,
        CustomerStatus::Inactive => base -= 0.2,
        CustomerStatus::Active => {}
    }
    match customer.segment.as_str() {
        "Enterprise" => base -= 0.1,
        "SMB" => base += 0.1,
        _ => {}
    }
    let score = (base + rng.normal(0.0, 0.3)).clamp(-1.0, 1.0);
    round_to(score, 3)
}

/// Additive risk score bucketed at 0.6 / 0.3. A Churned owner
/// short-circuits to High regardless of every other factor.
fn churn_risk_for(score: f64, customer: &CustomerRecord, rng: &mut StreamRng) -> ChurnRisk {
    let mut risk = 0.0;

    if score < -0.5 {
        risk += 0.6;
    } else if score < 0.0 {
        risk += 0.3;
    } else if score > 0.5 {
        risk -= 0.2;
    }

    match customer.status {
        CustomerStatus::Churned => return ChurnRisk::High,
        CustomerStatus::Inactive => risk += 0.3,
        CustomerStatus::Active => {}
    }

    if customer.segment == "Enterprise" {
        risk -= 0.1;
    }

    risk += rng.uniform(-0.1, 0.1);

    if risk > 0.6 {
        ChurnRisk::High
    } else if risk > 0.3 {
        ChurnRisk::Medium
    } else {
        ChurnRisk::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, TableSlot};
    use chrono::NaiveDate;

    fn customer(status: CustomerStatus, segment: &str) -> CustomerRecord {
        CustomerRecord {
            customer_id: "CUST_00001".into(),
            name: "Test Person".into(),
            company: "Test Co".into(),
            email: "test.person@company.com".into(),
            phone: "(555) 555-5555".into(),
            segment: segment.into(),
            region: "North America".into(),
            industry: "Technology".into(),
            company_size: "11-50".into(),
            account_manager: "Alex Morgan".into(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            last_activity: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            annual_revenue: 1_000_000.0,
            status,
        }
    }

    #[test]
    fn churned_status_short_circuits_to_high() {
        let mut rng = RngBank::new(1).for_table(TableSlot::Feedback);
        let churned = customer(CustomerStatus::Churned, "SMB");
        for score in [-0.9, 0.0, 0.9] {
            assert_eq!(churn_risk_for(score, &churned, &mut rng), ChurnRisk::High);
        }
    }

    #[test]
    fn strongly_negative_active_feedback_lands_high_or_medium() {
        // score -0.6 contributes +0.6; noise in [-0.1, 0.1] keeps the
        // total above the 0.3 Medium floor and can clear the 0.6 High bar.
        let mut rng = RngBank::new(2).for_table(TableSlot::Feedback);
        let active = customer(CustomerStatus::Active, "Mid-Market");
        let mut saw_high = false;
        for _ in 0..200 {
            let risk = churn_risk_for(-0.6, &active, &mut rng);
            assert_ne!(risk, ChurnRisk::Low, "risk score 0.6±0.1 can never bucket Low");
            if risk == ChurnRisk::High {
                saw_high = true;
            }
        }
        assert!(saw_high, "positive noise draws should clear the High bar");
    }

    #[test]
    fn happy_active_smb_feedback_is_low_risk() {
        let mut rng = RngBank::new(3).for_table(TableSlot::Feedback);
        let active = customer(CustomerStatus::Active, "SMB");
        for _ in 0..200 {
            assert_eq!(churn_risk_for(0.8, &active, &mut rng), ChurnRisk::Low);
        }
    }

    #[test]
    fn sentiment_offsets_combine_additively() {
        // Churned Enterprise base is -0.6; the Gaussian has sigma 0.3,
        // so across many draws the sample mean must sit well below zero.
        let mut rng = RngBank::new(4).for_table(TableSlot::Feedback);
        let worst = customer(CustomerStatus::Churned, "Enterprise");
        let n = 500;
        let total: f64 = (0..n).map(|_| sample_sentiment(&worst, &mut rng)).sum();
        let sample_mean = total / n as f64;
        assert!(sample_mean < -0.4, "mean {sample_mean} not pulled down by offsets");
    }

    #[test]
    fn sentiment_is_clipped_and_rounded() {
        let mut rng = RngBank::new(5).for_table(TableSlot::Feedback);
        let churned = customer(CustomerStatus::Churned, "Enterprise");
        for _ in 0..500 {
            let score = sample_sentiment(&churned, &mut rng);
            assert!((-1.0..=1.0).contains(&score));
            assert_eq!(score, round_to(score, 3));
        }
    }
}
