use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub overview: AnalyticsOverview,
    pub status_distribution: StatusDistribution,
    pub role_distribution: BTreeMap<String, i64>,
    pub conversion_rates: ConversionRates,
    pub monthly_trend: Vec<MonthlyTrendEntry>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl AnalyticsSummary {
    /// The all-zero payload served when the store is unreachable, so the
    /// client can still render an empty dashboard.
    pub fn empty() -> Self {
        Self {
            overview: AnalyticsOverview::default(),
            status_distribution: StatusDistribution::default(),
            role_distribution: BTreeMap::new(),
            conversion_rates: ConversionRates::default(),
            monthly_trend: Vec::new(),
            recent_activity: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_applications: i64,
    pub recent_applications: i64,
    pub average_experience: f64,
}

/// Counts for the four pipeline statuses. Hired records count toward totals
/// but are not part of this map.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusDistribution {
    pub applied: i64,
    pub interview: i64,
    pub offer: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    pub applied_to_interview: f64,
    pub interview_to_offer: f64,
    pub rejection_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendEntry {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub candidate_name: String,
    pub role: String,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_applications: i64,
    pub status_distribution: StatusDistribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub data: AnalyticsSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodAnalyticsResponse {
    pub success: bool,
    pub data: PeriodSummary,
}
