//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Most callers use the free getter functions at the bottom of this module
//! (`config::host()`, `config::gemini_api_key()`, ...) rather than holding the guard.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub grading_model: String,
    pub extraction_model: String,
    pub ai_request_timeout_secs: u64,
    pub ai_max_retries: u32,
    pub max_upload_mb: usize,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unset or malformed values fall back to development defaults. `JWT_SECRET`
    /// and `GEMINI_API_KEY` default to empty strings; the server refuses to start
    /// without a JWT secret and AI calls fail without an API key.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "evalsheet"),
            log_level: var_or("LOG_LEVEL", "api=info,marker=info,db=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/evalsheet.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 60),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_base_url: var_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            grading_model: var_or("GRADING_MODEL", "gemini-2.5-pro"),
            extraction_model: var_or("EXTRACTION_MODEL", "gemini-2.5-flash"),
            ai_request_timeout_secs: parsed_or("AI_REQUEST_TIMEOUT_SECS", 120),
            ai_max_retries: parsed_or("AI_MAX_RETRIES", 3),
            max_upload_mb: parsed_or("MAX_UPLOAD_MB", 20),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_gemini_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_api_key = value.into());
    }

    pub fn set_gemini_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_base_url = value.into());
    }

    pub fn set_ai_max_retries(value: u32) {
        AppConfig::set_field(|cfg| cfg.ai_max_retries = value);
    }

    pub fn set_max_upload_mb(value: usize) {
        AppConfig::set_field(|cfg| cfg.max_upload_mb = value);
    }
}

// --- Free getters ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

/// SQLite connection URL for `DATABASE_PATH`.
///
/// A value starting with `sqlite:` is used as is; a plain path becomes a
/// read-write-create file URL.
pub fn database_url() -> String {
    sqlite_url(&database_path())
}

pub fn sqlite_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:") {
        path_or_url.to_string()
    } else {
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

/// The database file behind `DATABASE_PATH`, or `None` for an in-memory URL.
pub fn database_file() -> Option<PathBuf> {
    sqlite_file(&database_path())
}

pub fn sqlite_file(path_or_url: &str) -> Option<PathBuf> {
    let Some(rest) = path_or_url.strip_prefix("sqlite:") else {
        return Some(PathBuf::from(path_or_url));
    };
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn gemini_api_key() -> String {
    AppConfig::global().gemini_api_key.clone()
}

pub fn gemini_base_url() -> String {
    AppConfig::global().gemini_base_url.clone()
}

pub fn grading_model() -> String {
    AppConfig::global().grading_model.clone()
}

pub fn extraction_model() -> String {
    AppConfig::global().extraction_model.clone()
}

pub fn ai_request_timeout_secs() -> u64 {
    AppConfig::global().ai_request_timeout_secs
}

pub fn ai_max_retries() -> u32 {
    AppConfig::global().ai_max_retries
}

/// Upload limit for a single multipart request, in bytes.
pub fn max_upload_bytes() -> usize {
    AppConfig::global().max_upload_mb.saturating_mul(1024 * 1024)
}
