//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Login tokens
//!
//! Customers log in with a token. Only its HMAC-SHA256 hash (keyed by
//! `TOKEN_SIGNING_SECRET`) is configured, as `customer_key:hash` pairs:
//!
//! ```bash
//! export TOKEN_SIGNING_SECRET="change-me"
//! export CUSTOMER_TOKENS="1:3f9a...c2,2:77b1...0e"
//! ```
//!
//! `expman-admin token create --customer 1` prints a fresh token and its entry.
//!
//! ## Required Variables
//!
//! - `TOKEN_SIGNING_SECRET` - HMAC key for login token hashes
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: `false`)
//! - `CUSTOMER_TOKENS` - Login token hashes (default: none)
//! - `SESSION_TTL_SECONDS` - Session lifetime (default: 1800, 60..=86400)
//! - `TRANSACTION_PAGE_SIZE` - Transactions per list page (default: 20, 1..=500)
//! - `SEED_DEMO_DATA` - Seed demo accounts and categories (default: `true`)
//! - `COOKIE_SECURE` - Mark the session cookie `Secure` (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// HMAC signing secret used to hash login tokens.
    /// Loaded from `TOKEN_SIGNING_SECRET`. Must be non-empty.
    pub token_signing_secret: String,
    /// `(customer_key, token_hash)` pairs from `CUSTOMER_TOKENS`.
    pub customer_tokens: Vec<(i64, String)>,
    pub session_ttl_seconds: u64,
    pub transaction_page_size: u32,
    pub seed_demo_data: bool,
    pub cookie_secure: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_SIGNING_SECRET` is missing or
    /// `CUSTOMER_TOKENS` is malformed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env_flag("BEHIND_PROXY", false);

        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        let customer_tokens = match env::var("CUSTOMER_TOKENS") {
            Ok(raw) => parse_customer_tokens(&raw).context("Failed to parse CUSTOMER_TOKENS")?,
            Err(_) => Vec::new(),
        };

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800);

        let transaction_page_size = env::var("TRANSACTION_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let seed_demo_data = env_flag("SEED_DEMO_DATA", true);
        let cookie_secure = env_flag("COOKIE_SECURE", false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            token_signing_secret,
            customer_tokens,
            session_ttl_seconds,
            transaction_page_size,
            seed_demo_data,
            cookie_secure,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `token_signing_secret` is empty
    /// - `session_ttl_seconds` or `transaction_page_size` is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        if !(60..=86_400).contains(&self.session_ttl_seconds) {
            anyhow::bail!(
                "SESSION_TTL_SECONDS must be between 60 and 86400, got {}",
                self.session_ttl_seconds
            );
        }

        if !(1..=500).contains(&self.transaction_page_size) {
            anyhow::bail!(
                "TRANSACTION_PAGE_SIZE must be between 1 and 500, got {}",
                self.transaction_page_size
            );
        }

        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Login tokens: {}", self.customer_tokens.len());
        tracing::info!("  Session TTL: {}s", self.session_ttl_seconds);
        tracing::info!("  Page size: {}", self.transaction_page_size);
        tracing::info!("  Demo data: {}", self.seed_demo_data);

        if self.customer_tokens.is_empty() {
            tracing::warn!("CUSTOMER_TOKENS is empty, nobody can log in");
        }
    }
}

/// Parses `customer_key:token_hash` pairs separated by commas.
///
/// Blank entries are skipped. Hashes must be 64 hex characters (SHA-256).
pub fn parse_customer_tokens(raw: &str) -> Result<Vec<(i64, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<(i64, String)> {
            let (key, hash) = entry
                .split_once(':')
                .with_context(|| format!("Entry '{}' is not in 'key:hash' form", entry))?;

            let customer_key: i64 = key
                .trim()
                .parse()
                .with_context(|| format!("Invalid customer key '{}'", key))?;

            let hash = hash.trim().to_ascii_lowercase();
            if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                anyhow::bail!(
                    "Token hash for customer {} must be 64 hex characters",
                    customer_key
                );
            }

            Ok((customer_key, hash))
        })
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
