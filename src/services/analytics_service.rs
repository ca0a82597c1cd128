use chrono::{DateTime, Duration, Months, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::dto::analytics_dto::{
    ActivityEntry, AnalyticsOverview, AnalyticsSummary, ConversionRates, MonthlyTrendEntry,
    PeriodSummary, StatusDistribution,
};
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::services::application_service::APPLICATION_COLUMNS;

/// How many trend buckets and activity entries the dashboard shows.
const TREND_MONTHS: usize = 6;
const ACTIVITY_LIMIT: usize = 5;

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the full snapshot and reduces it. Nothing is cached; the
    /// numbers always reflect the live record set.
    pub async fn overview(&self) -> Result<AnalyticsSummary> {
        let records = self.snapshot().await?;
        Ok(summarize(&records, crate::utils::time::now()))
    }

    pub async fn for_period(&self, period: &str) -> Result<PeriodSummary> {
        let now = crate::utils::time::now();
        let start = period_start(period, now);

        let sql =
            format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE applied_date >= $1");
        let records = sqlx::query_as::<_, Application>(&sql)
            .bind(start)
            .fetch_all(&self.pool)
            .await?;

        Ok(PeriodSummary {
            period: period.to_string(),
            start_date: start,
            end_date: now,
            total_applications: records.len() as i64,
            status_distribution: status_distribution(&records),
        })
    }

    async fn snapshot(&self) -> Result<Vec<Application>> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications");
        let records = sqlx::query_as::<_, Application>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}

/// Reduces a snapshot of application records into the dashboard summary.
/// Pure: an empty snapshot yields a well-formed all-zero summary, never NaN.
pub fn summarize(records: &[Application], now: DateTime<Utc>) -> AnalyticsSummary {
    let total = records.len() as i64;
    let distribution = status_distribution(records);

    let mut role_distribution: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        *role_distribution.entry(record.role.clone()).or_insert(0) += 1;
    }

    let average_experience = if records.is_empty() {
        0.0
    } else {
        let total_years: f64 = records.iter().map(|r| r.years_of_experience).sum();
        round_one(total_years / records.len() as f64)
    };

    let week_ago = now - Duration::days(7);
    let recent_applications = records
        .iter()
        .filter(|r| r.applied_date >= week_ago)
        .count() as i64;

    let advanced = distribution.interview + distribution.offer;
    let conversion_rates = ConversionRates {
        applied_to_interview: percentage(advanced, total),
        interview_to_offer: percentage(distribution.offer, advanced),
        rejection_rate: percentage(distribution.rejected, total),
    };

    let mut monthly: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        let month = record.applied_date.format("%Y-%m").to_string();
        *monthly.entry(month).or_insert(0) += 1;
    }
    let skip = monthly.len().saturating_sub(TREND_MONTHS);
    let monthly_trend = monthly
        .into_iter()
        .skip(skip)
        .map(|(month, count)| MonthlyTrendEntry { month, count })
        .collect();

    let mut by_update: Vec<&Application> = records.iter().collect();
    by_update.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    let recent_activity = by_update
        .into_iter()
        .take(ACTIVITY_LIMIT)
        .map(|r| ActivityEntry {
            id: r.id,
            candidate_name: r.candidate_name.clone(),
            role: r.role.clone(),
            status: r.status.clone(),
            last_updated: r.last_updated,
        })
        .collect();

    AnalyticsSummary {
        overview: AnalyticsOverview {
            total_applications: total,
            recent_applications,
            average_experience,
        },
        status_distribution: distribution,
        role_distribution,
        conversion_rates,
        monthly_trend,
        recent_activity,
    }
}

/// Cutoff for the period-scoped view. Unknown tags fall back to one month.
pub fn period_start(period: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    if period == "week" {
        return now - Duration::days(7);
    }
    let months = match period {
        "quarter" => 3,
        "year" => 12,
        _ => 1,
    };
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

fn status_distribution(records: &[Application]) -> StatusDistribution {
    let mut counts = StatusDistribution::default();
    for record in records {
        match ApplicationStatus::parse(&record.status) {
            Some(ApplicationStatus::Applied) => counts.applied += 1,
            Some(ApplicationStatus::Interview) => counts.interview += 1,
            Some(ApplicationStatus::Offer) => counts.offer += 1,
            Some(ApplicationStatus::Rejected) => counts.rejected += 1,
            // Hired stays out of the pipeline distribution.
            Some(ApplicationStatus::Hired) | None => {}
        }
    }
    counts
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_one(part as f64 / whole as f64 * 100.0)
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
