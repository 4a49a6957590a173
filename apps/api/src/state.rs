use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::external_jobs::ExternalJobSource;
use crate::store::{ApplicationRepository, JobRepository, UserRepository};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    /// Pluggable listing source. Default: RemotiveClient.
    pub external_jobs: Arc<dyn ExternalJobSource>,
    pub tokens: TokenService,
    pub config: Config,
}
