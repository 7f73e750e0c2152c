use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SEED_EMAIL: &str = "teacher@uvas.edu.pk";
pub const DEFAULT_SEED_PASSWORD: &str = "password123";

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 12;
/// One year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Lifetime clamped to `1..=MAX_SESSION_TTL_MINUTES`.
    pub fn ttl_minutes(&self) -> i64 {
        self.ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES)
    }
}

/// Bootstrap teacher account provisioned on first start.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub email: String,
    pub password: String,
    pub name: String,
    pub department: String,
    /// Set when the password came from the built-in default rather than the environment.
    pub default_password: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
    pub seed: Option<SeedConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://timetable.db".into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };

        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "timetable".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "timetable-web".into()),
            ttl_minutes: parse_ttl(std::env::var("SESSION_TTL_MINUTES").ok().as_deref())?,
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "timetable_session".into()),
            cookie_secure: env_flag("SESSION_COOKIE_SECURE", false),
        };

        let seed = if env_flag("SEED_TEACHER", true) {
            let password = std::env::var("SEED_TEACHER_PASSWORD").ok();
            Some(SeedConfig {
                email: std::env::var("SEED_TEACHER_EMAIL")
                    .unwrap_or_else(|_| DEFAULT_SEED_EMAIL.into()),
                default_password: password.is_none(),
                password: password.unwrap_or_else(|| DEFAULT_SEED_PASSWORD.into()),
                name: std::env::var("SEED_TEACHER_NAME").unwrap_or_else(|_| "Dr. Smith".into()),
                department: std::env::var("SEED_TEACHER_DEPARTMENT")
                    .unwrap_or_else(|_| "CS".into()),
            })
        } else {
            None
        };

        Ok(Self {
            database_url,
            host,
            port,
            session,
            seed,
        })
    }
}

fn parse_ttl(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_MINUTES);
    };
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("SESSION_TTL_MINUTES must be a whole number, got {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes),
        "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_flag(&v).unwrap_or(default))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
