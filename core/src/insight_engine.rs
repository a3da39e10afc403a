//! Insight engine — rule-based recommendations over a generated batch.
//!
//! This engine:
//!   1. Surfaces priority actions for immediate attention
//!   2. Targets churn prevention at the worst segment and region
//!   3. Finds upsell, expansion, and referral revenue opportunities
//!   4. Compares channel, category, and resolution performance
//!   5. Scores each segment and region through a fixed rule ladder
//!   6. Mines pain-point keywords out of negative feedback text
//!   7. Rolls up success metrics across all three tables
//!
//! Pure function of its inputs: no I/O, no randomness, no state
//! beyond the static pain-point keyword list. Empty tables degrade
//! to empty or zero-valued sections — never an error.

use crate::{
    customer_gen::CustomerRecord,
    deal_gen::{DealRecord, DealStage},
    feedback_gen::{ChurnRisk, FeedbackRecord},
    stats::{group_by, mean, percentile, round_to},
};
use serde::{Deserialize, Serialize};

// ── Report types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub priority_actions: Vec<PriorityAction>,
    pub churn_prevention: Vec<ChurnRecommendation>,
    pub revenue_opportunities: Vec<RevenueOpportunity>,
    pub operational_insights: Vec<OperationalInsight>,
    pub segment_insights: Vec<GroupInsight>,
    pub regional_insights: Vec<GroupInsight>,
    pub pain_point_analysis: PainPointAnalysis,
    pub success_metrics: SuccessMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityAction {
    pub action: String,
    pub priority: String,
    pub impact: String,
    pub metric: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnRecommendation {
    pub recommendation: String,
    pub reason: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueOpportunity {
    pub opportunity: String,
    pub potential: String,
    pub action: String,
    pub candidate_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalInsight {
    pub insight: String,
    pub detail: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInsight {
    pub group: String,
    pub avg_sentiment: f64,
    pub high_risk_count: usize,
    pub avg_response_hours: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainPointCount {
    pub pain_point: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainPointAnalysis {
    pub top_pain_points: Vec<PainPointCount>,
    pub total_pain_points: usize,
    pub unique_pain_points: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMetrics {
    pub customer_satisfaction: SatisfactionMetrics,
    pub churn_metrics: ChurnMetrics,
    pub operational_metrics: OperationalMetrics,
    pub sales_metrics: SalesMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfactionMetrics {
    pub avg_sentiment: f64,
    pub positive_sentiment_rate: f64,
    pub negative_sentiment_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnMetrics {
    pub high_risk_rate: f64,
    pub low_risk_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub avg_response_hours: f64,
    pub resolution_rate: f64,
    pub feedback_volume: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub total_pipeline: f64,
    pub avg_deal_size: f64,
    pub win_rate: f64,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Distinguishes the wording of segment vs. regional recommendations;
/// the rule ladder itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Segment,
    Region,
}

pub struct InsightEngine {
    pain_point_keywords: &'static [&'static str],
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        Self {
            pain_point_keywords: &[
                "slow", "expensive", "difficult", "complicated", "poor", "terrible",
                "frustrated", "disappointed", "issues", "problems", "downtime",
                "billing", "support", "training", "integration", "security",
            ],
        }
    }

    /// Build the full report. Infallible: empty inputs produce empty
    /// sections with every division guarded.
    pub fn analyze(
        &self,
        customers: &[CustomerRecord],
        deals: &[DealRecord],
        feedback: &[FeedbackRecord],
    ) -> Report {
        let _ = customers; // Joined data is denormalized onto feedback rows.
        Report {
            priority_actions: self.priority_actions(deals, feedback),
            churn_prevention: self.churn_prevention(feedback),
            revenue_opportunities: self.revenue_opportunities(deals, feedback),
            operational_insights: self.operational_insights(feedback),
            segment_insights: self.group_insights(feedback, GroupKind::Segment),
            regional_insights: self.group_insights(feedback, GroupKind::Region),
            pain_point_analysis: self.pain_point_analysis(feedback),
            success_metrics: self.success_metrics(deals, feedback),
        }
    }

    fn priority_actions(&self, deals: &[DealRecord], feedback: &[FeedbackRecord]) -> Vec<PriorityAction> {
        let mut actions = Vec::new();

        // High churn-risk customers need outreach first.
        let high_risk: Vec<&FeedbackRecord> = feedback
            .iter()
            .filter(|f| f.churn_risk == ChurnRisk::High)
            .collect();
        if !high_risk.is_empty() {
            let customers_at_risk = distinct_customers(&high_risk);
            actions.push(PriorityAction {
                action: format!("Immediate outreach to {customers_at_risk} high-risk customers"),
                priority: "High".into(),
                impact: "Prevent customer churn".into(),
                metric: format!("{customers_at_risk} customers at risk"),
            });
        }

        // Strongly negative feedback still sitting unresolved.
        let unresolved_negative = feedback
            .iter()
            .filter(|f| f.sentiment_score < -0.3 && !f.resolved)
            .count();
        if unresolved_negative > 0 {
            actions.push(PriorityAction {
                action: format!("Resolve {unresolved_negative} outstanding negative feedback cases"),
                priority: "High".into(),
                impact: "Improve customer satisfaction".into(),
                metric: format!("{unresolved_negative} unresolved issues"),
            });
        }

        // High-value deals stuck in late stages.
        let sizes: Vec<f64> = deals.iter().map(|d| d.size).collect();
        let threshold = percentile(&sizes, 0.8);
        let stalled: Vec<&DealRecord> = deals
            .iter()
            .filter(|d| {
                d.size > threshold
                    && matches!(d.stage, DealStage::Proposal | DealStage::Negotiation)
            })
            .collect();
        if !stalled.is_empty() {
            let total_value: f64 = stalled.iter().map(|d| d.size).sum();
            actions.push(PriorityAction {
                action: format!("Accelerate {} high-value deals in late stages", stalled.len()),
                priority: "Medium".into(),
                impact: "Increase revenue closure".into(),
                metric: format!("${:.0} in pipeline", round_to(total_value, 0)),
            });
        }

        actions
    }

    fn churn_prevention(&self, feedback: &[FeedbackRecord]) -> Vec<ChurnRecommendation> {
        let mut recommendations = Vec::new();
        let high_risk: Vec<FeedbackRecord> = feedback
            .iter()
            .filter(|f| f.churn_risk == ChurnRisk::High)
            .cloned()
            .collect();

        // Worst segment by High-risk row count. Ties keep the first
        // group encountered.
        if let Some((segment, count)) = largest_group(&high_risk, |f| f.segment.clone()) {
            recommendations.push(ChurnRecommendation {
                recommendation: format!("Focus churn prevention efforts on {segment} segment"),
                reason: format!("{count} high-risk customers identified"),
                action: format!("Implement targeted retention program for {segment} customers"),
            });
        }

        if let Some((region, count)) = largest_group(&high_risk, |f| f.region.clone()) {
            recommendations.push(ChurnRecommendation {
                recommendation: format!("Strengthen customer success in {region} region"),
                reason: format!("{count} high-risk customers in this region"),
                action: format!("Deploy additional customer success resources to {region}"),
            });
        }

        let slow_responses = feedback
            .iter()
            .filter(|f| f.sentiment_score < 0.0 && f.response_time_hours > 24.0)
            .count();
        if slow_responses > 0 {
            recommendations.push(ChurnRecommendation {
                recommendation: "Improve response times for negative feedback".into(),
                reason: format!("{slow_responses} negative feedback cases with >24h response time"),
                action: "Implement automated escalation for negative sentiment feedback".into(),
            });
        }

        recommendations
    }

    fn revenue_opportunities(
        &self,
        deals: &[DealRecord],
        feedback: &[FeedbackRecord],
    ) -> Vec<RevenueOpportunity> {
        let mut opportunities = Vec::new();

        // Upsell: happy customers whose average deal size trails the
        // overall average by 30% or more.
        let happy: Vec<&FeedbackRecord> = feedback
            .iter()
            .filter(|f| f.sentiment_score > 0.5)
            .collect();
        let happy_ids: Vec<&str> = {
            let mut ids: Vec<&str> = happy.iter().map(|f| f.customer_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        if !happy_ids.is_empty() && !deals.is_empty() {
            let overall_avg = mean(&deals.iter().map(|d| d.size).collect::<Vec<f64>>());
            let candidate_avgs: Vec<f64> = group_by(deals, |d| d.customer_id.clone())
                .into_iter()
                .filter(|(id, _)| happy_ids.binary_search(&id.as_str()).is_ok())
                .map(|(_, rows)| mean(&rows.iter().map(|d| d.size).collect::<Vec<f64>>()))
                .filter(|avg| *avg < overall_avg * 0.7)
                .collect();
            if !candidate_avgs.is_empty() {
                let potential = (overall_avg - mean(&candidate_avgs)) * candidate_avgs.len() as f64;
                opportunities.push(RevenueOpportunity {
                    opportunity: format!(
                        "Upsell {} satisfied customers with small deal sizes",
                        candidate_avgs.len()
                    ),
                    potential: format!("${:.0}", round_to(potential, 0)),
                    action: "Launch targeted upsell campaign to happy customers".into(),
                    candidate_count: candidate_avgs.len(),
                });
            }
        }

        // Expansion: satisfied Enterprise accounts.
        let enterprise_happy: Vec<&FeedbackRecord> = feedback
            .iter()
            .filter(|f| f.segment == "Enterprise" && f.sentiment_score > 0.3)
            .collect();
        let expansion_count = distinct_customers(&enterprise_happy);
        if expansion_count > 0 {
            opportunities.push(RevenueOpportunity {
                opportunity: format!("Expand within {expansion_count} satisfied Enterprise accounts"),
                potential: "High - Enterprise expansion deals typically 2-3x larger".into(),
                action: "Engage account teams for expansion discussions".into(),
                candidate_count: expansion_count,
            });
        }

        // Referrals: highly satisfied SMB customers.
        let smb_happy: Vec<&FeedbackRecord> = feedback
            .iter()
            .filter(|f| f.segment == "SMB" && f.sentiment_score > 0.6)
            .collect();
        let referral_count = distinct_customers(&smb_happy);
        if referral_count > 0 {
            let estimated = round_to(referral_count as f64 * 0.3, 0);
            opportunities.push(RevenueOpportunity {
                opportunity: format!(
                    "Leverage {referral_count} highly satisfied SMB customers for referrals"
                ),
                potential: format!("Estimated {estimated:.0} potential referrals"),
                action: "Launch customer referral program".into(),
                candidate_count: referral_count,
            });
        }

        opportunities
    }

    fn operational_insights(&self, feedback: &[FeedbackRecord]) -> Vec<OperationalInsight> {
        let mut insights = Vec::new();

        // Channel spread: compare the weakest and strongest channels.
        let mut channel_means: Vec<(String, f64)> = group_by(feedback, |f| f.channel.clone())
            .into_iter()
            .map(|(channel, rows)| {
                (channel, mean(&rows.iter().map(|f| f.sentiment_score).collect::<Vec<f64>>()))
            })
            .collect();
        channel_means.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        if channel_means.len() > 1 {
            let (worst_channel, worst) = &channel_means[0];
            let (best_channel, best) = channel_means.last().unwrap();
            insights.push(OperationalInsight {
                insight: "Channel performance varies significantly".into(),
                detail: format!(
                    "{worst_channel} has lowest satisfaction ({:.2}), {best_channel} has highest ({:.2})",
                    round_to(*worst, 2),
                    round_to(*best, 2),
                ),
                recommendation: format!("Investigate and improve {worst_channel} experience"),
            });
        }

        // Most problematic category.
        let mut category_means: Vec<(String, f64)> = group_by(feedback, |f| f.category.clone())
            .into_iter()
            .map(|(category, rows)| {
                (category, mean(&rows.iter().map(|f| f.sentiment_score).collect::<Vec<f64>>()))
            })
            .collect();
        category_means.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        if let Some((worst_category, score)) = category_means.first() {
            insights.push(OperationalInsight {
                insight: format!("{worst_category} is the most problematic area"),
                detail: format!("Average sentiment score: {:.2}", round_to(*score, 2)),
                recommendation: format!("Prioritize improvements in {worst_category}"),
            });
        }

        // Resolution impact.
        if !feedback.is_empty() {
            let resolved: Vec<f64> = feedback
                .iter()
                .filter(|f| f.resolved)
                .map(|f| f.sentiment_score)
                .collect();
            let unresolved: Vec<f64> = feedback
                .iter()
                .filter(|f| !f.resolved)
                .map(|f| f.sentiment_score)
                .collect();
            insights.push(OperationalInsight {
                insight: "Resolution impact on sentiment".into(),
                detail: format!(
                    "Resolved issues: {:.2} avg sentiment, Unresolved: {:.2}",
                    round_to(mean(&resolved), 2),
                    round_to(mean(&unresolved), 2),
                ),
                recommendation: "Focus on improving resolution rates and quality".into(),
            });
        }

        insights
    }

    fn group_insights(&self, feedback: &[FeedbackRecord], kind: GroupKind) -> Vec<GroupInsight> {
        let groups = match kind {
            GroupKind::Segment => group_by(feedback, |f| f.segment.clone()),
            GroupKind::Region => group_by(feedback, |f| f.region.clone()),
        };

        groups
            .into_iter()
            .map(|(name, rows)| {
                let avg_sentiment = round_to(
                    mean(&rows.iter().map(|f| f.sentiment_score).collect::<Vec<f64>>()),
                    2,
                );
                let high_risk_count =
                    rows.iter().filter(|f| f.churn_risk == ChurnRisk::High).count();
                let avg_response_hours = round_to(
                    mean(&rows.iter().map(|f| f.response_time_hours).collect::<Vec<f64>>()),
                    2,
                );
                let recommendation = group_recommendation(
                    &name,
                    kind,
                    avg_sentiment,
                    high_risk_count,
                    avg_response_hours,
                );
                GroupInsight {
                    group: name,
                    avg_sentiment,
                    high_risk_count,
                    avg_response_hours,
                    recommendation,
                }
            })
            .collect()
    }

    fn pain_point_analysis(&self, feedback: &[FeedbackRecord]) -> PainPointAnalysis {
        // Count keyword hits in negative text, keyword-list order per
        // row, first-encounter order across rows.
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        let mut total = 0usize;
        for entry in feedback.iter().filter(|f| f.sentiment_score < -0.2) {
            let lowered = entry.text.to_lowercase();
            for keyword in self.pain_point_keywords {
                if lowered.contains(keyword) {
                    total += 1;
                    match counts.iter_mut().find(|(k, _)| k == keyword) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((keyword, 1)),
                    }
                }
            }
        }

        let unique = counts.len();
        // Stable sort keeps first-encounter order within equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let recommendations = pain_point_recommendations(&counts);
        let top_pain_points = counts
            .into_iter()
            .take(10)
            .map(|(keyword, frequency)| PainPointCount {
                pain_point: keyword.to_string(),
                frequency,
            })
            .collect();

        PainPointAnalysis {
            top_pain_points,
            total_pain_points: total,
            unique_pain_points: unique,
            recommendations,
        }
    }

    fn success_metrics(&self, deals: &[DealRecord], feedback: &[FeedbackRecord]) -> SuccessMetrics {
        let n = feedback.len();
        let rate = |count: usize| {
            if n == 0 {
                0.0
            } else {
                round_to(count as f64 / n as f64 * 100.0, 1)
            }
        };

        let sentiment: Vec<f64> = feedback.iter().map(|f| f.sentiment_score).collect();
        let response: Vec<f64> = feedback.iter().map(|f| f.response_time_hours).collect();

        let customer_satisfaction = SatisfactionMetrics {
            avg_sentiment: round_to(mean(&sentiment), 3),
            positive_sentiment_rate: rate(feedback.iter().filter(|f| f.sentiment_score > 0.2).count()),
            negative_sentiment_rate: rate(feedback.iter().filter(|f| f.sentiment_score < -0.2).count()),
        };

        let churn_metrics = ChurnMetrics {
            high_risk_rate: rate(feedback.iter().filter(|f| f.churn_risk == ChurnRisk::High).count()),
            low_risk_rate: rate(feedback.iter().filter(|f| f.churn_risk == ChurnRisk::Low).count()),
        };

        let operational_metrics = OperationalMetrics {
            avg_response_hours: round_to(mean(&response), 1),
            resolution_rate: rate(feedback.iter().filter(|f| f.resolved).count()),
            feedback_volume: n,
        };

        let open_pipeline: f64 = deals.iter().filter(|d| d.stage.is_open()).map(|d| d.size).sum();
        let win_rate = if deals.is_empty() {
            0.0
        } else {
            let won = deals.iter().filter(|d| d.stage == DealStage::ClosedWon).count();
            round_to(won as f64 / deals.len() as f64 * 100.0, 1)
        };
        let sales_metrics = SalesMetrics {
            total_pipeline: round_to(open_pipeline, 0),
            avg_deal_size: round_to(mean(&deals.iter().map(|d| d.size).collect::<Vec<f64>>()), 0),
            win_rate,
        };

        SuccessMetrics {
            customer_satisfaction,
            churn_metrics,
            operational_metrics,
            sales_metrics,
        }
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

fn distinct_customers(rows: &[&FeedbackRecord]) -> usize {
    let mut ids: Vec<&str> = rows.iter().map(|f| f.customer_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// Largest group by row count; ties resolve to the group encountered
/// first. None when there are no rows.
fn largest_group<F>(rows: &[FeedbackRecord], key: F) -> Option<(String, usize)>
where
    F: Fn(&FeedbackRecord) -> String,
{
    let mut best: Option<(String, usize)> = None;
    for (k, members) in group_by(rows, key) {
        let count = members.len();
        if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
            best = Some((k, count));
        }
    }
    best
}

/// Four-branch rule ladder, evaluated in priority order.
fn group_recommendation(
    name: &str,
    kind: GroupKind,
    avg_sentiment: f64,
    high_risk_count: usize,
    avg_response_hours: f64,
) -> String {
    match kind {
        GroupKind::Segment => {
            if avg_sentiment < -0.2 {
                format!("High priority: Address satisfaction issues in {name} segment")
            } else if high_risk_count > 5 {
                format!("Focus on churn prevention for {name} customers")
            } else if avg_response_hours > 24.0 {
                format!("Improve response times for {name} segment")
            } else {
                format!("Maintain current service levels for {name} segment")
            }
        }
        GroupKind::Region => {
            if avg_sentiment < -0.2 {
                format!("Deploy additional resources to improve {name} satisfaction")
            } else if high_risk_count > 5 {
                format!("Implement retention program in {name}")
            } else if avg_response_hours > 24.0 {
                format!("Strengthen support coverage in {name}")
            } else {
                format!("Leverage {name} best practices for other regions")
            }
        }
    }
}

/// Canned recommendations for the top three keywords, with a generic
/// fallback naming the keyword.
fn pain_point_recommendations(counts: &[(&'static str, usize)]) -> Vec<String> {
    counts
        .iter()
        .take(3)
        .map(|(keyword, _)| match *keyword {
            "slow" | "response" => "Implement faster response time SLAs".to_string(),
            "expensive" | "pricing" => {
                "Review pricing strategy and value communication".to_string()
            }
            "support" | "help" => {
                "Enhance customer support training and resources".to_string()
            }
            "difficult" | "complicated" => {
                "Simplify user experience and improve documentation".to_string()
            }
            "integration" | "technical" => {
                "Improve technical documentation and integration support".to_string()
            }
            other => format!("Address '{other}' issues through targeted improvement program"),
        })
        .collect()
}
