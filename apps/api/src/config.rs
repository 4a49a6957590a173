use anyhow::{bail, Context, Result};

const DEFAULT_EXTERNAL_JOBS_URL: &str = "https://remotive.com/api/remote-jobs";

/// Upper bound for `TOKEN_TTL_HOURS`: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Emails granted the admin role at registration.
    pub admin_emails: Vec<String>,
    pub external_jobs_url: String,
    pub external_jobs_limit: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_hours: parse_token_ttl(&optional_env("TOKEN_TTL_HOURS", "24"))?,
            admin_emails: parse_admin_emails(&optional_env("ADMIN_EMAILS", "")),
            external_jobs_url: optional_env("EXTERNAL_JOBS_URL", DEFAULT_EXTERNAL_JOBS_URL),
            external_jobs_limit: optional_env("EXTERNAL_JOBS_LIMIT", "30")
                .parse::<usize>()
                .context("EXTERNAL_JOBS_LIMIT must be a positive integer")?,
            port: optional_env("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_token_ttl(raw: &str) -> Result<i64> {
    let hours = raw
        .trim()
        .parse::<i64>()
        .context("TOKEN_TTL_HOURS must be an integer")?;
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/job_portal_test".to_string(),
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
            admin_emails: vec!["admin@example.com".to_string()],
            external_jobs_url: DEFAULT_EXTERNAL_JOBS_URL.to_string(),
            external_jobs_limit: 30,
            port: 5000,
            rust_log: "debug".to_string(),
        }
    }
}
