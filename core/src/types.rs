//! Shared primitive types used across the generator and the insight engine.

/// Identifier of a customer row, formatted `CUST_{index:05}`.
pub type CustomerId = String;

/// Identifier of a deal row, formatted `DEAL_{customer_id}_{seq}`.
pub type DealId = String;

/// Identifier of a feedback row, formatted `FB_{customer_id}_{seq}`.
pub type FeedbackId = String;
