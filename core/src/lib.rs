//! crmsynth-core — synthetic CRM dataset generator and rule-based
//! insight engine.
//!
//! Two entry points:
//!   - [`dataset::DatasetGenerator`] builds one deterministic batch of
//!     Customers, Deals, and Feedback (plus summary statistics) from a
//!     master seed and caller-supplied parameters.
//!   - [`insight_engine::InsightEngine`] turns a batch into a nested
//!     recommendation report via fixed aggregation and threshold rules.
//!
//! RULES:
//!   - All randomness flows through the RngBank; no platform RNG.
//!   - Tables are never mutated after generation.
//!   - The engine is a pure function of its three input tables.

pub mod clock;
pub mod customer_gen;
pub mod dataset;
pub mod deal_gen;
pub mod error;
pub mod feedback_gen;
pub mod insight_engine;
pub mod name_generator;
pub mod params;
pub mod rng;
pub mod stats;
pub mod tabular;
pub mod templates;
pub mod types;

pub use dataset::{Dataset, DatasetGenerator, SummaryStats};
pub use error::{GenError, GenResult};
pub use insight_engine::{InsightEngine, Report};
pub use params::GeneratorParams;
