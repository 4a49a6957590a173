use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::application::ApplicationRecord;
use crate::models::job::{JobInput, JobPosting};
use crate::models::user::{NewUser, UserRow};
use crate::store::{ApplicationRepository, JobRepository, RepositoryError, UserRepository};

/// Postgres-backed implementation of every repository trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-index violation to `Conflict`, everything else passes through.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(message.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: NewUser) -> Result<UserRow, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users
                (id, name, email, password_hash, role, skills,
                 preferred_location, preferred_job_type, experience_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.skills)
        .bind(&user.preferred_location)
        .bind(&user.preferred_job_type)
        .bind(&user.experience_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email is already registered"))?;

        info!("Inserted user {} ({})", row.id, row.role);
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl JobRepository for PgStore {
    async fn list_all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM jobs ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_active(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM jobs WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<JobPosting>, RepositoryError> {
        let row = sqlx::query_as::<_, JobPosting>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, job: JobInput) -> Result<JobPosting, RepositoryError> {
        let row = sqlx::query_as::<_, JobPosting>(
            r#"
            INSERT INTO jobs
                (id, title, company, location, job_type, experience_level,
                 required_skills, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience_level)
        .bind(&job.required_skills)
        .bind(job.is_active)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted job {} ({} @ {})", row.id, row.title, row.company);
        Ok(row)
    }

    async fn update(&self, id: Uuid, job: JobInput) -> Result<Option<JobPosting>, RepositoryError> {
        let row = sqlx::query_as::<_, JobPosting>(
            r#"
            UPDATE jobs SET
                title = $2, company = $3, location = $4, job_type = $5,
                experience_level = $6, required_skills = $7, is_active = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience_level)
        .bind(&job.required_skills)
        .bind(job.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn exists(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE user_id = $1 AND job_id = $2)",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationRecord>(
            "INSERT INTO applications (id, user_id, job_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "You have already applied to this job"))?;
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ApplicationRecord>(
            "SELECT * FROM applications WHERE user_id = $1 ORDER BY applied_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
