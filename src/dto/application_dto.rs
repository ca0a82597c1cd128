use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::Application;

/// Body of `POST /api/applications`. Required fields are modeled as `Option`
/// so presence can be checked explicitly and reported as a 400 with the
/// field list, instead of failing JSON extraction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub candidate_name: Option<String>,
    pub role: Option<String>,
    #[validate(range(min = 0.0))]
    pub years_of_experience: Option<f64>,
    pub resume_link: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Body of `PUT /api/applications/:id`. Absent fields keep their stored
/// values; `lastUpdated` is refreshed either way.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    #[validate(length(min = 1))]
    pub candidate_name: Option<String>,
    #[validate(length(min = 1))]
    pub role: Option<String>,
    #[validate(range(min = 0.0))]
    pub years_of_experience: Option<f64>,
    #[validate(length(min = 1))]
    pub resume_link: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChangesQuery {
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub candidate_name: String,
    pub role: String,
    pub years_of_experience: f64,
    pub resume_link: String,
    pub status: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: String,
    pub applied_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            candidate_name: value.candidate_name,
            role: value.role,
            years_of_experience: value.years_of_experience,
            resume_link: value.resume_link,
            status: value.status,
            email: value.email,
            phone: value.phone,
            notes: value.notes,
            applied_date: value.applied_date,
            last_updated: value.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<ApplicationResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDataResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: ApplicationResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteApplicationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesSummary {
    pub changed_applications: i64,
    pub last_changed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangesResponse {
    pub success: bool,
    pub data: ChangesSummary,
}
