use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::TokenService;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::input::{normalize_optional, normalize_skills, require_text, SkillsInput};
use crate::models::user::{NewUser, Role, UserRow};
use crate::store::UserRepository;

const MIN_PASSWORD_LEN: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub skills: Option<SkillsInput>,
    pub preferred_location: Option<String>,
    pub preferred_job_type: Option<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn register(
    users: &dyn UserRepository,
    config: &Config,
    request: RegisterRequest,
) -> Result<UserRow, AppError> {
    let name = require_text(request.name, "name")?;
    let email = require_text(request.email, "email")?.to_lowercase();
    if !email.contains('@') {
        return Err(AppError::Validation("email is invalid".to_string()));
    }
    let password = request.password.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_blocking(password).await?;
    let role = if config.is_admin_email(&email) {
        Role::Admin
    } else {
        Role::User
    };

    let user = users
        .insert(NewUser {
            name,
            email,
            password_hash,
            role,
            skills: normalize_skills(request.skills),
            preferred_location: normalize_optional(request.preferred_location),
            preferred_job_type: normalize_optional(request.preferred_job_type),
            experience_level: normalize_optional(request.experience_level),
        })
        .await?;

    info!("Registered user {} as {}", user.id, role.as_str());
    Ok(user)
}

pub async fn login(
    users: &dyn UserRepository,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let email = require_text(request.email, "email")?.to_lowercase();
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("password is required".to_string()))?;

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = users.find_by_email(&email).await?.ok_or_else(invalid)?;
    let stored = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    if !verified {
        return Err(invalid());
    }

    let role = user.role();
    let token = tokens.issue(user.id, role)?;
    info!("User {} logged in", user.id);
    Ok(LoginResponse { token, role })
}

/// Runs argon2 on the blocking pool.
async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}
