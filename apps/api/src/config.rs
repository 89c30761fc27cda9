use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::auth::sessions::DEFAULT_IDLE_TTL_SECS;
use crate::career::pipeline::RoleSource;

/// Where job listings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource {
    Mock,
    JSearch,
}

impl FromStr for JobSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(JobSource::Mock),
            "jsearch" => Ok(JobSource::JSearch),
            other => bail!("JOB_SOURCE must be 'mock' or 'jsearch', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Absent → users are kept in memory for the life of the process.
    pub database_url: Option<String>,
    pub role_source: RoleSource,
    pub role_table_path: Option<PathBuf>,
    pub job_source: JobSource,
    pub jsearch_api_key: Option<String>,
    /// Sessions idle longer than this are evicted.
    pub session_idle_ttl_secs: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let job_source = optional_env("JOB_SOURCE")
            .map(|s| s.parse::<JobSource>())
            .transpose()?
            .unwrap_or(JobSource::Mock);

        let jsearch_api_key = optional_env("JSEARCH_API_KEY");
        if job_source == JobSource::JSearch && jsearch_api_key.is_none() {
            bail!("JSEARCH_API_KEY is required when JOB_SOURCE=jsearch");
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            database_url: optional_env("DATABASE_URL"),
            role_source: optional_env("ROLE_SOURCE")
                .map(|s| s.parse::<RoleSource>())
                .transpose()?
                .unwrap_or(RoleSource::Table),
            role_table_path: optional_env("ROLE_TABLE_PATH").map(PathBuf::from),
            job_source,
            jsearch_api_key,
            session_idle_ttl_secs: parse_ttl(optional_env("SESSION_IDLE_TTL_SECS"))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_ttl(raw: Option<String>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_IDLE_TTL_SECS);
    };
    let secs = raw
        .trim()
        .parse::<i64>()
        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;
    if secs <= 0 {
        bail!("SESSION_IDLE_TTL_SECS must be positive, got {secs}");
    }
    Ok(secs)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_source_parses() {
        assert_eq!("mock".parse::<JobSource>().unwrap(), JobSource::Mock);
        assert_eq!(" JSearch ".parse::<JobSource>().unwrap(), JobSource::JSearch);
        assert!("indeed".parse::<JobSource>().is_err());
    }

    #[test]
    fn test_session_ttl_parses() {
        assert_eq!(parse_ttl(None).unwrap(), DEFAULT_IDLE_TTL_SECS);
        assert_eq!(parse_ttl(Some(" 600 ".to_string())).unwrap(), 600);
        assert!(parse_ttl(Some("0".to_string())).is_err());
        assert!(parse_ttl(Some("ten minutes".to_string())).is_err());
    }
}
