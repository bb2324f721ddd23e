use std::env;

use anyhow::Context;

/// Longest session a login may open, one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// How strictly order status changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Only forward edges of the lifecycle plus cancellation.
    #[default]
    Strict,
    /// Any status may be set at any time.
    Permissive,
}

impl TransitionPolicy {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => anyhow::bail!("unknown ORDER_TRANSITIONS value: {other}"),
        }
    }
}

/// Reads `SESSION_TTL_HOURS`. Missing, unparsable or non-positive values
/// fall back to 24; values above [`MAX_SESSION_TTL_HOURS`] are rejected.
pub fn parse_session_ttl(value: Option<&str>) -> anyhow::Result<i64> {
    let hours = value
        .and_then(|h| h.trim().parse::<i64>().ok())
        .filter(|h| *h > 0)
        .unwrap_or(24);
    if hours > MAX_SESSION_TTL_HOURS {
        anyhow::bail!("SESSION_TTL_HOURS must be at most {MAX_SESSION_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub transition_policy: TransitionPolicy,
    pub low_stock_threshold: i64,
    pub seed_password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let ttl = env::var("SESSION_TTL_HOURS").ok();
        let session_ttl_hours = parse_session_ttl(ttl.as_deref())?;
        let transition_policy = match env::var("ORDER_TRANSITIONS") {
            Ok(value) => TransitionPolicy::parse(&value)?,
            Err(_) => TransitionPolicy::default(),
        };
        let low_stock_threshold = env::var("LOW_STOCK_THRESHOLD")
            .ok()
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(50);
        let seed_password =
            env::var("SEED_PASSWORD").unwrap_or_else(|_| "Apamate.25".to_string());

        Ok(Self {
            host,
            port,
            jwt_secret,
            session_ttl_hours,
            transition_policy,
            low_stock_threshold,
            seed_password,
        })
    }

    /// Configuration for tests and local tooling.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
            transition_policy: TransitionPolicy::Strict,
            low_stock_threshold: 50,
            seed_password: "Apamate.25".to_string(),
        }
    }
}
