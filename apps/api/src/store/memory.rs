use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::application::ApplicationRecord;
use crate::models::job::{JobInput, JobPosting};
use crate::models::user::{NewUser, UserRow};
use crate::store::{ApplicationRepository, JobRepository, RepositoryError, UserRepository};

/// In-memory store used by service and router tests.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserRow>>,
    jobs: Mutex<Vec<JobPosting>>,
    applications: Mutex<Vec<ApplicationRecord>>,
}

impl MemoryStore {
    /// Inserts a job with a caller-chosen id so ordering tests are predictable.
    pub fn seed_job(&self, id: Uuid, job: JobInput) -> JobPosting {
        let now = Utc::now();
        let posting = JobPosting {
            id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            experience_level: job.experience_level,
            required_skills: job.required_skills,
            is_active: job.is_active,
            created_at: now,
            updated_at: now,
        };
        self.jobs.lock().unwrap().push(posting.clone());
        posting
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<UserRow, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(
                "Email is already registered".to_string(),
            ));
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            skills: user.skills,
            preferred_location: user.preferred_location,
            preferred_job_type: user.preferred_job_type,
            experience_level: user.experience_level,
            created_at: Utc::now(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().rev().cloned().collect())
    }

    async fn list_active(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().filter(|j| j.is_active).cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<JobPosting>, RepositoryError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn insert(&self, job: JobInput) -> Result<JobPosting, RepositoryError> {
        Ok(self.seed_job(Uuid::new_v4(), job))
    }

    async fn update(&self, id: Uuid, job: JobInput) -> Result<Option<JobPosting>, RepositoryError> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(existing) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        existing.title = job.title;
        existing.company = job.company;
        existing.location = job.location;
        existing.job_type = job.job_type;
        existing.experience_level = job.experience_level;
        existing.required_skills = job.required_skills;
        existing.is_active = job.is_active;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        let deleted = jobs.len() < before;
        if deleted {
            self.applications
                .lock()
                .unwrap()
                .retain(|a| a.job_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn exists(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, RepositoryError> {
        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .any(|a| a.user_id == user_id && a.job_id == job_id))
    }

    async fn insert(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut applications = self.applications.lock().unwrap();
        if applications
            .iter()
            .any(|a| a.user_id == user_id && a.job_id == job_id)
        {
            return Err(RepositoryError::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }
        let record = ApplicationRecord {
            id: Uuid::new_v4(),
            user_id,
            job_id,
            applied_at: Utc::now(),
        };
        applications.push(record.clone());
        Ok(record)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_application_insert_rejects_duplicate_pair() {
        let store = MemoryStore::default();
        let (user_id, job_id) = (Uuid::new_v4(), Uuid::new_v4());

        ApplicationRepository::insert(&store, user_id, job_id)
            .await
            .unwrap();
        let err = ApplicationRepository::insert(&store, user_id, job_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
