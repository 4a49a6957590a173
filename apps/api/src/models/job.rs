use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::input::{normalize_optional, normalize_skills, require_text, SkillsInput};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub required_skills: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a job posting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub required_skills: Option<SkillsInput>,
    pub is_active: Option<bool>,
}

/// A job posting that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInput {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub required_skills: Vec<String>,
    pub is_active: bool,
}

impl JobPayload {
    pub fn validate(self) -> Result<JobInput, AppError> {
        Ok(JobInput {
            title: require_text(self.title, "title")?,
            company: require_text(self.company, "company")?,
            location: normalize_optional(self.location),
            job_type: normalize_optional(self.job_type),
            experience_level: normalize_optional(self.experience_level),
            required_skills: normalize_skills(self.required_skills),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}
