use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{
    ApplicationListQuery, ChangesSummary, CreateApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, NewApplication};

pub(crate) const APPLICATION_COLUMNS: &str = "id, candidate_name, role, years_of_experience, \
     resume_link, status, email, phone, notes, applied_date, last_updated";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered listing, most recently applied first.
    pub async fn list(&self, query: ApplicationListQuery) -> Result<Vec<Application>> {
        let (filters, args) = build_list_filters(&query);

        let where_clause = if filters.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications {where_clause} ORDER BY applied_date DESC"
        );

        let mut statement = sqlx::query_as::<_, Application>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let applications = statement.fetch_all(&self.pool).await?;

        Ok(applications)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        application.ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn create(&self, payload: CreateApplicationPayload) -> Result<Application> {
        let new_application = NewApplication::from_payload(payload)?;
        self.insert(new_application).await
    }

    pub async fn insert(&self, new_application: NewApplication) -> Result<Application> {
        let sql = format!(
            "INSERT INTO applications \
                 (candidate_name, role, years_of_experience, resume_link, status, email, phone, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {APPLICATION_COLUMNS}"
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(new_application.candidate_name)
            .bind(new_application.role)
            .bind(new_application.years_of_experience)
            .bind(new_application.resume_link)
            .bind(new_application.status.as_str())
            .bind(new_application.email)
            .bind(new_application.phone)
            .bind(new_application.notes)
            .fetch_one(&self.pool)
            .await?;

        Ok(application)
    }

    /// Full update. Provided fields replace stored ones, absent fields are
    /// kept; `last_updated` is refreshed regardless. This path accepts any of
    /// the five statuses, including Hired.
    pub async fn update(&self, id: Uuid, payload: UpdateApplicationPayload) -> Result<Application> {
        if let Some(status) = payload.status.as_deref() {
            if ApplicationStatus::parse(status).is_none() {
                return Err(Error::BadRequest(format!("Invalid status: {}", status)));
            }
        }

        let sql = format!(
            "UPDATE applications SET \
                 candidate_name = COALESCE($2, candidate_name), \
                 role = COALESCE($3, role), \
                 years_of_experience = COALESCE($4, years_of_experience), \
                 resume_link = COALESCE($5, resume_link), \
                 status = COALESCE($6, status), \
                 email = COALESCE($7, email), \
                 phone = COALESCE($8, phone), \
                 notes = COALESCE($9, notes), \
                 last_updated = NOW() \
             WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(payload.candidate_name.map(|s| s.trim().to_string()))
            .bind(payload.role.map(|s| s.trim().to_string()))
            .bind(payload.years_of_experience)
            .bind(payload.resume_link.map(|s| s.trim().to_string()))
            .bind(payload.status)
            .bind(payload.email)
            .bind(payload.phone)
            .bind(payload.notes)
            .fetch_optional(&self.pool)
            .await?;

        application.ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    /// Status patch for board drag-and-drop. Only the four pipeline statuses
    /// are accepted here; Hired is reachable through `update` alone.
    /// Validation happens before the store is touched.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Application> {
        let accepted = ApplicationStatus::parse(status)
            .map(ApplicationStatus::patchable)
            .unwrap_or(false);
        if !accepted {
            return Err(Error::BadRequest(
                "Invalid status. Must be one of: Applied, Interview, Offer, Rejected".to_string(),
            ));
        }

        let sql = format!(
            "UPDATE applications SET status = $2, last_updated = NOW() \
             WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        application.ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".to_string()));
        }
        Ok(())
    }

    /// Mutation notification contract for analytics consumers: how many
    /// records changed after `since`, and when the latest change happened.
    pub async fn changes_since(&self, since: DateTime<Utc>) -> Result<ChangesSummary> {
        let row: (i64, Option<DateTime<Utc>>) = sqlx::query_as(
            "SELECT COUNT(*), MAX(last_updated) FROM applications WHERE last_updated > $1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(ChangesSummary {
            changed_applications: row.0,
            last_changed_at: row.1,
        })
    }
}

/// Translates a list query into SQL predicates plus bind arguments, one
/// placeholder per argument. `status` is an exact match, `role` a
/// case-insensitive substring, `search` a case-insensitive substring over
/// candidate name, role and email. Fields combine with AND; the sentinel
/// value "all" disables the status and role filters.
fn build_list_filters(query: &ApplicationListQuery) -> (Vec<String>, Vec<String>) {
    let mut filters = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(status) = query.status.as_deref() {
        if !status.is_empty() && status != "all" {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status.to_string());
        }
    }

    if let Some(role) = query.role.as_deref() {
        if !role.is_empty() && role != "all" {
            filters.push(format!("role ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", role));
        }
    }

    if let Some(search) = query.search.as_deref() {
        if !search.is_empty() {
            let first = args.len() + 1;
            filters.push(format!(
                "(candidate_name ILIKE ${} OR role ILIKE ${} OR email ILIKE ${})",
                first,
                first + 1,
                first + 2
            ));
            args.push(format!("%{}%", search));
            args.push(format!("%{}%", search));
            args.push(format!("%{}%", search));
        }
    }

    (filters, args)
}
