pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::external_jobs::handlers as external_jobs;
use crate::jobs::handlers as jobs;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        // Candidate
        .route("/api/recommend", get(recommendation::handle_recommend))
        .route(
            "/api/applications",
            post(applications::handle_apply).get(applications::handle_list_applications),
        )
        .route(
            "/api/external-jobs",
            get(external_jobs::handle_external_jobs),
        )
        // Admin
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::TokenService;
    use crate::config::Config;
    use crate::external_jobs::{ExternalJob, ExternalJobSource, ExternalJobsError};
    use crate::store::memory::MemoryStore;

    struct StubSource {
        fail: bool,
    }

    #[async_trait]
    impl ExternalJobSource for StubSource {
        async fn search(&self, term: Option<&str>) -> Result<Vec<ExternalJob>, ExternalJobsError> {
            if self.fail {
                return Err(ExternalJobsError::Status { status: 503 });
            }
            Ok(vec![ExternalJob {
                id: 7,
                title: format!("Remote {}", term.unwrap_or("anything")),
                company: "Remote Co".to_string(),
                job_type: "Full Time".to_string(),
                candidate_location: "Worldwide".to_string(),
                salary: None,
                description_snippet: "Ship it.".to_string(),
                category: "Software Development".to_string(),
                publication_date: None,
                url: "https://example.com/7".to_string(),
            }])
        }
    }

    fn test_app(fail_external: bool) -> Router {
        let store = Arc::new(MemoryStore::default());
        let config = Config::for_tests();
        let state = AppState {
            users: store.clone(),
            jobs: store.clone(),
            applications: store,
            external_jobs: Arc::new(StubSource {
                fail: fail_external,
            }),
            tokens: TokenService::new(&config.jwt_secret, config.token_ttl_hours),
            config,
        };
        build_router(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn register_and_login(app: &Router, email: &str, skills: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Test User",
                "email": email,
                "password": "secret123",
                "skills": skills,
                "preferredLocation": "Remote",
                "preferredJobType": "Full-time",
                "experienceLevel": "Junior"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "secret123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app(false);
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommend_requires_token() {
        let app = test_app(false);
        let (status, body) = send(&app, Method::GET, "/api/recommend", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");

        let (status, _) = send(&app, Method::GET, "/api/recommend", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_message() {
        let app = test_app(false);
        register_and_login(&app, "ada@example.com", "js").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope-nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_non_admin_cannot_manage_jobs() {
        let app = test_app(false);
        let token = register_and_login(&app, "ada@example.com", "js").await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/jobs",
            Some(&token),
            Some(json!({ "title": "Dev", "company": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_recommend_and_apply_flow() {
        let app = test_app(false);
        let admin = register_and_login(&app, "admin@example.com", "").await;
        let user = register_and_login(&app, "ada@example.com", "js, sql").await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/jobs",
            Some(&admin),
            Some(json!({
                "title": "Frontend Dev",
                "company": "Acme",
                "location": "remote",
                "jobType": "Full-time",
                "experienceLevel": "Junior",
                "requiredSkills": ["js", "python"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let job_id = created["job"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/api/recommend", Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["job"]["id"], job_id.as_str());
        assert_eq!(recs[0]["explanation"]["matchedSkills"], json!(["js"]));
        assert_eq!(recs[0]["explanation"]["locationMatch"], true);
        // 0.5*0.5 + 0.2 + 0.15 + 0.15
        let score = recs[0]["score"].as_f64().unwrap();
        assert!((score - 0.75).abs() < 1e-9, "Score was {score}");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/applications",
            Some(&user),
            Some(json!({ "jobId": job_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["application"]["jobId"], job_id.as_str());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/applications",
            Some(&user),
            Some(json!({ "jobId": job_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "You have already applied to this job");

        let (status, body) = send(&app, Method::GET, "/api/applications", Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applications"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_with_malformed_job_id_is_bad_request() {
        let app = test_app(false);
        let user = register_and_login(&app, "ada@example.com", "js").await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/applications",
            Some(&user),
            Some(json!({ "jobId": "not-a-uuid" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_job_crud() {
        let app = test_app(false);
        let admin = register_and_login(&app, "admin@example.com", "").await;

        let (_, created) = send(
            &app,
            Method::POST,
            "/api/jobs",
            Some(&admin),
            Some(json!({ "title": "Dev", "company": "Acme", "requiredSkills": "go, sql" })),
        )
        .await;
        let id = created["job"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["job"]["isActive"], true);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/jobs/{id}"),
            Some(&admin),
            Some(json!({ "title": "Dev II", "company": "Acme", "isActive": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["job"]["title"], "Dev II");

        let (status, listed) = send(&app, Method::GET, "/api/jobs", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["jobs"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/jobs/{id}"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/jobs/{id}"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_external_jobs_proxy() {
        let app = test_app(false);
        let user = register_and_login(&app, "ada@example.com", "js").await;
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/external-jobs?search=rust",
            Some(&user),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"][0]["title"], "Remote rust");
        assert_eq!(body["jobs"][0]["candidateLocation"], "Worldwide");
    }

    #[tokio::test]
    async fn test_external_jobs_upstream_failure_is_bad_gateway() {
        let app = test_app(true);
        let user = register_and_login(&app, "ada@example.com", "js").await;
        let (status, body) = send(&app, Method::GET, "/api/external-jobs", Some(&user), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "External jobs service is unavailable");
    }
}
