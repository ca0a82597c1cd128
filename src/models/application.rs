use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::dto::application_dto::CreateApplicationPayload;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
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

/// Pipeline stage of an application. Stored as TEXT; the column carries a
/// CHECK constraint over the same five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const PIPELINE: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Applied" => Some(Self::Applied),
            "Interview" => Some(Self::Interview),
            "Offer" => Some(Self::Offer),
            "Rejected" => Some(Self::Rejected),
            "Hired" => Some(Self::Hired),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Hired => "Hired",
        }
    }

    /// Whether the status-patch endpoint accepts this value. Hired is not
    /// patchable; it is only reachable through a full update.
    pub fn patchable(self) -> bool {
        Self::PIPELINE.contains(&self)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, trimmed application ready for insertion. Construction is the
/// single place where required-field presence and defaults are applied, so
/// nothing unchecked reaches the store.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub candidate_name: String,
    pub role: String,
    pub years_of_experience: f64,
    pub resume_link: String,
    pub status: ApplicationStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: String,
}

impl NewApplication {
    pub fn from_payload(payload: CreateApplicationPayload) -> Result<Self> {
        let candidate_name = non_empty(payload.candidate_name);
        let role = non_empty(payload.role);
        let resume_link = non_empty(payload.resume_link);

        // yearsOfExperience: zero is a valid value, absence is not.
        let (Some(candidate_name), Some(role), Some(years_of_experience), Some(resume_link)) =
            (candidate_name, role, payload.years_of_experience, resume_link)
        else {
            return Err(Error::BadRequest(
                "Please provide all required fields: candidateName, role, yearsOfExperience, resumeLink"
                    .to_string(),
            ));
        };

        Ok(Self {
            candidate_name,
            role,
            years_of_experience,
            resume_link,
            status: ApplicationStatus::Applied,
            email: non_empty(payload.email),
            phone: non_empty(payload.phone),
            notes: payload.notes.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
