use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::service::{self, LoginRequest, LoginResponse, RegisterRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user = service::register(state.users.as_ref(), &state.config, request).await?;
    Ok(Json(RegisterResponse {
        message: "Registered successfully. You can now login.".to_string(),
        user_id: user.id,
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = service::login(state.users.as_ref(), &state.tokens, request).await?;
    Ok(Json(response))
}
