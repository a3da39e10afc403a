//! Generation parameters — defaulting, validation, and categorical weights.

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGIONS: [&str; 3] = ["North America", "Europe", "APAC"];
pub const DEFAULT_SEGMENTS: [&str; 3] = ["SMB", "Mid-Market", "Enterprise"];

/// Fixed draw weights, applied only when the caller's set contains
/// exactly the default members (in any order). Arbitrary sets fall
/// back to uniform weighting.
const DEFAULT_REGION_WEIGHTS: [f64; 3] = [0.40, 0.35, 0.25];
const DEFAULT_SEGMENT_WEIGHTS: [f64; 3] = [0.50, 0.30, 0.20];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorParams {
    pub customer_count: usize,
    pub regions: Vec<String>,
    pub segments: Vec<String>,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            customer_count: 500,
            regions: DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
            segments: DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorParams {
    pub fn new(customer_count: usize, regions: Vec<String>, segments: Vec<String>) -> Self {
        let defaults = Self::default();
        Self {
            customer_count,
            regions: if regions.is_empty() { defaults.regions } else { regions },
            segments: if segments.is_empty() { defaults.segments } else { segments },
        }
    }

    /// Reject malformed parameters before any table is built.
    pub fn validate(&self) -> GenResult<()> {
        if self.customer_count == 0 {
            return Err(GenError::invalid("customer_count must be a positive integer"));
        }
        validate_set("regions", &self.regions)?;
        validate_set("segments", &self.segments)?;
        Ok(())
    }

    /// Per-region draw weights, in the caller's supplied order.
    pub fn region_weights(&self) -> Vec<f64> {
        category_weights(&self.regions, &DEFAULT_REGIONS, &DEFAULT_REGION_WEIGHTS)
    }

    /// Per-segment draw weights, in the caller's supplied order.
    pub fn segment_weights(&self) -> Vec<f64> {
        category_weights(&self.segments, &DEFAULT_SEGMENTS, &DEFAULT_SEGMENT_WEIGHTS)
    }
}

fn validate_set(name: &str, values: &[String]) -> GenResult<()> {
    if values.is_empty() {
        return Err(GenError::invalid(format!("{name} must not be empty")));
    }
    for value in values {
        if value.trim().is_empty() {
            return Err(GenError::invalid(format!("{name} contains a blank entry")));
        }
    }
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(GenError::invalid(format!("{name} contains duplicate entry '{value}'")));
        }
    }
    Ok(())
}

/// The fixed weights assume the default three-member set; anything
/// else gets uniform weights so no member silently vanishes.
fn category_weights(values: &[String], defaults: &[&str; 3], weights: &[f64; 3]) -> Vec<f64> {
    let is_default_set = values.len() == defaults.len()
        && defaults.iter().all(|d| values.iter().any(|v| v == d));
    if is_default_set {
        // Weights apply positionally: the first-supplied member gets
        // the first weight, whatever the order.
        weights.to_vec()
    } else {
        vec![1.0 / values.len() as f64; values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zero_customers_is_rejected() {
        let params = GeneratorParams::new(0, vec![], vec![]);
        assert!(params.validate().is_err());
    }

    #[test]
    fn blank_and_duplicate_entries_are_rejected() {
        let blank = GeneratorParams::new(10, strings(&["EMEA", "  "]), vec![]);
        assert!(blank.validate().is_err());

        let dup = GeneratorParams::new(10, vec![], strings(&["SMB", "SMB"]));
        assert!(dup.validate().is_err());
    }

    #[test]
    fn empty_sets_fall_back_to_defaults() {
        let params = GeneratorParams::new(10, vec![], vec![]);
        assert_eq!(params.regions, strings(&DEFAULT_REGIONS));
        assert_eq!(params.segments, strings(&DEFAULT_SEGMENTS));
    }

    #[test]
    fn default_sets_use_fixed_weights() {
        let params = GeneratorParams::new(10, vec![], vec![]);
        assert_eq!(params.region_weights(), vec![0.40, 0.35, 0.25]);
        assert_eq!(params.segment_weights(), vec![0.50, 0.30, 0.20]);
    }

    #[test]
    fn reordered_default_set_keeps_positional_weights() {
        let params =
            GeneratorParams::new(10, strings(&["Europe", "APAC", "North America"]), vec![]);
        // First-supplied region takes the 0.40 weight.
        assert_eq!(params.region_weights(), vec![0.40, 0.35, 0.25]);
    }

    #[test]
    fn custom_sets_use_uniform_weights() {
        let params = GeneratorParams::new(10, strings(&["EMEA", "LATAM"]), strings(&["Startup"]));
        assert_eq!(params.region_weights(), vec![0.5, 0.5]);
        assert_eq!(params.segment_weights(), vec![1.0]);
    }
}
