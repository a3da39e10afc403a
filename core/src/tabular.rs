//! Export boundary — generic tabular form for the typed record lists.
//!
//! Records stay strongly typed inside the core; callers that want to
//! ship a table out (delimited text, charting) convert here and never
//! earlier.

use crate::{
    customer_gen::CustomerRecord,
    deal_gen::DealRecord,
    error::GenResult,
    feedback_gen::FeedbackRecord,
};

/// A flat table: one header row plus stringified cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Render as delimited text, one line per row, headers first.
    /// Quoting and escaping follow the `csv` writer's rules.
    pub fn to_delimited(&self, delimiter: u8) -> GenResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(self.headers.iter().copied())?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Conversion into the generic tabular form.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

pub fn to_table<T: Tabular>(records: &[T]) -> Table {
    Table {
        headers: T::headers(),
        rows: records.iter().map(Tabular::row).collect(),
    }
}

impl Tabular for CustomerRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Customer_ID", "Customer_Name", "Company_Name", "Email", "Phone",
            "Segment", "Region", "Industry", "Company_Size", "Account_Manager",
            "Created_Date", "Last_Activity", "Annual_Revenue", "Status",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.customer_id.clone(),
            self.name.clone(),
            self.company.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.segment.clone(),
            self.region.clone(),
            self.industry.clone(),
            self.company_size.clone(),
            self.account_manager.clone(),
            self.created_date.to_string(),
            self.last_activity.to_string(),
            format!("{:.2}", self.annual_revenue),
            self.status.as_str().to_string(),
        ]
    }
}

impl Tabular for DealRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Deal_ID", "Customer_ID", "Deal_Name", "Deal_Size", "Stage",
            "Close_Probability", "Expected_Close_Date", "Created_Date",
            "Owner", "Product", "Source",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.deal_id.clone(),
            self.customer_id.clone(),
            self.name.clone(),
            format!("{:.2}", self.size),
            self.stage.as_str().to_string(),
            format!("{:.3}", self.close_probability),
            self.expected_close_date.to_string(),
            self.created_date.to_string(),
            self.owner.clone(),
            self.product.clone(),
            self.source.clone(),
        ]
    }
}

impl Tabular for FeedbackRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Feedback_ID", "Customer_ID", "Feedback_Text", "Sentiment_Score",
            "Sentiment_Label", "Churn_Risk", "Feedback_Date", "Feedback_Channel",
            "Category", "Region", "Segment", "Resolved", "Response_Time_Hours",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.feedback_id.clone(),
            self.customer_id.clone(),
            self.text.clone(),
            format!("{:.3}", self.sentiment_score),
            self.sentiment_label.as_str().to_string(),
            self.churn_risk.as_str().to_string(),
            self.date.to_string(),
            self.channel.clone(),
            self.category.clone(),
            self.region.clone(),
            self.segment.clone(),
            self.resolved.to_string(),
            format!("{:.2}", self.response_time_hours),
        ]
    }
}
