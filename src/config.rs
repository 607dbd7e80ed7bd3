use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Scanning
    pub scan_cooldown: Duration,
    pub access_code_name: String,
    pub default_tolerance_minutes: u32,

    // Rate limiting
    pub rate_scan_per_min: u32,
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub seed_demo_data: bool,
}

/// Reads `key`, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env_or("SERVER_ADDR", "127.0.0.1:8080".to_string())?,
            api_prefix: env_or("API_PREFIX", "/api".to_string())?,
            log_dir: env_or("LOG_DIR", "logs".to_string())?,

            scan_cooldown: Duration::from_secs(env_or("SCAN_COOLDOWN_SECS", 3u64)?),
            access_code_name: env_or("ACCESS_CODE_NAME", "General Access Code".to_string())?,
            default_tolerance_minutes: env_or("DEFAULT_TOLERANCE_MINUTES", 0u32)?,

            // zero would make the limiter unbuildable
            rate_scan_per_min: env_or("RATE_SCAN_PER_MIN", 60u32)?.max(1),
            rate_login_per_min: env_or("RATE_LOGIN_PER_MIN", 10u32)?.max(1),
            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", 1000u32)?.max(1),

            seed_demo_data: env_or("SEED_DEMO_DATA", false)?,
        })
    }
}
