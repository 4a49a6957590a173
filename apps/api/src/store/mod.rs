//! Storage seams. Services depend on these traits; `PgStore` backs them in
//! production and `MemoryStore` in tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::ApplicationRecord;
use crate::models::job::{JobInput, JobPosting};
use crate::models::user::{NewUser, UserRow};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn insert(&self, user: NewUser) -> Result<UserRow, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, RepositoryError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// All postings, newest first.
    async fn list_all(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    async fn list_active(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    async fn find(&self, id: Uuid) -> Result<Option<JobPosting>, RepositoryError>;
    async fn insert(&self, job: JobInput) -> Result<JobPosting, RepositoryError>;
    async fn update(&self, id: Uuid, job: JobInput) -> Result<Option<JobPosting>, RepositoryError>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn exists(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, RepositoryError>;
    /// Fails with `Conflict` when the (user, job) pair already exists.
    async fn insert(&self, user_id: Uuid, job_id: Uuid)
        -> Result<ApplicationRecord, RepositoryError>;
    /// The user's applications, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}
