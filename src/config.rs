//! Environment-driven configuration for the page shell and the chat relay.

use crate::chat::DEFAULT_CHAT_ENDPOINT;
use crate::clock::{ClockLocale, ClockSettings, parse_offset};
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

/// Bundled config for builds that ship without a `.env` (wasm, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_TICK: Duration = Duration::from_millis(1000);
pub const DEFAULT_RELAY_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://127.0.0.1:8000";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Must run on the main thread before any other thread is spawned.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_env() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_env() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: only called from `main` before a runtime or any other thread exists
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// `KEY=VALUE` pairs, skipping blanks and `#` comments.
fn parse_env_lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        Some((key.trim(), value.trim()))
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub chat_endpoint: String,
    pub clock: ClockSettings,
    pub tick: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            clock: ClockSettings::default(),
            tick: DEFAULT_TICK,
        }
    }
}

impl PageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unusable values are logged and replaced by their defaults so the page
    /// always loads.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("FOLIO_CHAT_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.chat_endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup("FOLIO_CLOCK_OFFSET") {
            match parse_offset(&raw) {
                Ok(offset) => config.clock.offset = offset,
                Err(err) => tracing::warn!(value = %raw, error = %err, "ignoring FOLIO_CLOCK_OFFSET"),
            }
        }

        if let Some(raw) = lookup("FOLIO_CLOCK_LOCALE") {
            match raw.parse::<ClockLocale>() {
                Ok(locale) => config.clock.locale = locale,
                Err(err) => tracing::warn!(value = %raw, error = %err, "ignoring FOLIO_CLOCK_LOCALE"),
            }
        }

        if let Some(raw) = lookup("FOLIO_CLOCK_TICK_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick = Duration::from_millis(ms),
                _ => tracing::warn!(value = %raw, "ignoring FOLIO_CLOCK_TICK_MS"),
            }
        }

        config
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelayConfig {
    pub addr: SocketAddr,
    pub allowed_origin: String,
    /// `None` puts the relay in echo mode.
    pub gemini_api_key: Option<String>,
    pub upstream_timeout: Duration,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("FOLIO_RELAY_ADDR").unwrap_or_else(|| DEFAULT_RELAY_ADDR.to_string());
        let addr = raw_addr.trim().parse().map_err(|e| ConfigError {
            key: "FOLIO_RELAY_ADDR",
            reason: format!("{raw_addr}: {e}"),
        })?;

        let allowed_origin = lookup("FOLIO_ALLOWED_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            addr,
            allowed_origin,
            gemini_api_key,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        })
    }
}
