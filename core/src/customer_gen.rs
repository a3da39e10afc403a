//! Customer table generation.
//!
//! One record per index, categorical fields independently sampled.
//! Region and segment come only from the caller-supplied sets; the
//! fixed default weights apply only to the default sets (see params).

use crate::{
    clock::DatasetClock,
    error::{GenError, GenResult},
    name_generator::NameGenerator,
    params::GeneratorParams,
    rng::StreamRng,
    types::CustomerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const STATUS_WEIGHTS: [f64; 3] = [0.80, 0.15, 0.05];
const COMPANY_SIZE_BUCKETS: [&str; 5] = ["1-10", "11-50", "51-200", "201-1000", "1000+"];
const COMPANY_SIZE_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Churned,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Churned => "Churned",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub segment: String,
    pub region: String,
    pub industry: String,
    pub company_size: String,
    pub account_manager: String,
    pub created_date: NaiveDate,
    pub last_activity: NaiveDate,
    pub annual_revenue: f64,
    pub status: CustomerStatus,
}

/// Generate the customer table. Params must already be validated;
/// a zero count still errors rather than yielding an empty table.
pub fn generate_customers(
    params: &GeneratorParams,
    clock: &DatasetClock,
    rng: &mut StreamRng,
) -> GenResult<Vec<CustomerRecord>> {
    if params.customer_count == 0 {
        return Err(GenError::invalid("customer_count must be a positive integer"));
    }

    let region_weights = params.region_weights();
    let segment_weights = params.segment_weights();
    let mut customers = Vec::with_capacity(params.customer_count);

    for i in 0..params.customer_count {
        let customer_id = format!("CUST_{:05}", i + 1);
        let (first, last) = NameGenerator::name_parts(rng);
        let email = NameGenerator::email(first, last, rng);

        let segment = params.segments[rng.weighted_index(&segment_weights)].clone();
        let region = params.regions[rng.weighted_index(&region_weights)].clone();

        let status = match rng.weighted_index(&STATUS_WEIGHTS) {
            0 => CustomerStatus::Active,
            1 => CustomerStatus::Inactive,
            _ => CustomerStatus::Churned,
        };

        customers.push(CustomerRecord {
            customer_id,
            name: format!("{first} {last}"),
            company: NameGenerator::company_name(rng),
            email,
            phone: NameGenerator::phone(rng),
            segment,
            region,
            industry: NameGenerator::industry(rng).to_string(),
            company_size: COMPANY_SIZE_BUCKETS[rng.weighted_index(&COMPANY_SIZE_WEIGHTS)]
                .to_string(),
            account_manager: NameGenerator::full_name(rng),
            created_date: clock.date_between(rng, -730, 0),
            last_activity: clock.date_between(rng, -30, 0),
            annual_revenue: rng.log_normal(12.0, 1.5) * 1000.0,
            status,
        });
    }

    Ok(customers)
}
