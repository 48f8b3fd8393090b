use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "http://16.176.198.162:8080";
pub const DEFAULT_SESSION_COOKIE: &str = "JSESSIONID";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base: String,
    pub state_dir: PathBuf,
    pub session_cookie: String,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_base = env::var("JOLUV_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let state_dir = match env::var("JOLUV_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| {
                    AppError::Validation(
                        "JOLUV_STATE_DIR is not set and no data directory was found".to_string(),
                    )
                })?
                .join("joluv"),
        };

        let session_cookie = env::var("JOLUV_SESSION_COOKIE")
            .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());

        let timeout_secs = parse_var("JOLUV_TIMEOUT_SECS", 15)?;
        let debounce_ms = parse_var("JOLUV_SEARCH_DEBOUNCE_MS", 300)?;

        Ok(Self {
            api_base,
            state_dir,
            session_cookie,
            request_timeout: Duration::from_secs(timeout_secs),
            search_debounce: Duration::from_millis(debounce_ms),
        })
    }

    /// Config pointing at an explicit backend, used by tests and `--api-base`.
    pub fn with_api_base(api_base: impl Into<String>, state_dir: PathBuf) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            state_dir,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            request_timeout: Duration::from_secs(15),
            search_debounce: Duration::ZERO,
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

fn parse_var(key: &str, default: u64) -> Result<u64, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::Validation(format!("{} must be a whole number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
