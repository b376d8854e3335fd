use std::str::FromStr;
use std::time::Duration;

use airwatch_core::cooldown::{CooldownScope, DEFAULT_ALERT_COOLDOWN};
use airwatch_core::seen::DEFAULT_SEEN_CAPACITY;
use airwatch_db::DEFAULT_MAX_CONNECTIONS;

/// Default period between scans.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of most recent measurements evaluated per scan.
pub const DEFAULT_FETCH_LIMIT: i64 = 10;

/// Default consecutive missing-profile failures before a measurement is
/// dead-lettered (one hour at the default scan interval).
pub const DEFAULT_MAX_PROFILE_RETRIES: u32 = 720;

/// Alert monitor configuration loaded from environment variables.
///
/// All fields have defaults matching the production behaviour; override via
/// environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Maximum pooled database connections (default: `5`).
    pub max_connections: u32,
    /// Period between scans (default: 5 s).
    pub scan_interval: Duration,
    /// Minimum quiet period between two alerts for one cooldown key (default: 60 s).
    pub alert_cooldown: Duration,
    /// How cooldown windows are keyed (default: per recipient).
    pub cooldown_scope: CooldownScope,
    /// Measurements fetched per scan (default: `10`).
    pub fetch_limit: i64,
    /// Seen-set capacity; always at least twice `fetch_limit` (default: `10000`).
    pub seen_capacity: usize,
    /// Missing-profile retries before dead-lettering; `0` retries forever
    /// (default: `720`).
    pub max_profile_retries: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            alert_cooldown: DEFAULT_ALERT_COOLDOWN,
            cooldown_scope: CooldownScope::default(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            seen_capacity: DEFAULT_SEEN_CAPACITY,
            max_profile_retries: DEFAULT_MAX_PROFILE_RETRIES,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `DB_MAX_CONNECTIONS`  | `5`         |
    /// | `SCAN_INTERVAL_SECS`  | `5`         |
    /// | `ALERT_COOLDOWN_SECS` | `60`        |
    /// | `COOLDOWN_SCOPE`      | `recipient` |
    /// | `FETCH_LIMIT`         | `10`        |
    /// | `SEEN_CAPACITY`       | `10000`     |
    /// | `MAX_PROFILE_RETRIES` | `720`       |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Values that fail to parse fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections);
        let scan_interval_secs: u64 = parse_or(
            &lookup,
            "SCAN_INTERVAL_SECS",
            defaults.scan_interval.as_secs(),
        );
        let cooldown_secs: u64 = parse_or(
            &lookup,
            "ALERT_COOLDOWN_SECS",
            defaults.alert_cooldown.as_secs(),
        );
        let cooldown_scope = parse_or(&lookup, "COOLDOWN_SCOPE", defaults.cooldown_scope);
        let fetch_limit: i64 = parse_or(&lookup, "FETCH_LIMIT", defaults.fetch_limit).max(1);
        let seen_capacity: usize = parse_or(&lookup, "SEEN_CAPACITY", defaults.seen_capacity);
        let max_profile_retries =
            parse_or(&lookup, "MAX_PROFILE_RETRIES", defaults.max_profile_retries);

        let mut config = Self {
            max_connections,
            scan_interval: Duration::from_secs(scan_interval_secs.max(1)),
            alert_cooldown: Duration::from_secs(cooldown_secs),
            cooldown_scope,
            fetch_limit,
            seen_capacity,
            max_profile_retries,
        };

        let effective = config.effective_seen_capacity();
        if effective != seen_capacity {
            tracing::warn!(
                seen_capacity,
                fetch_limit,
                "SEEN_CAPACITY below twice FETCH_LIMIT, raising it"
            );
            config.seen_capacity = effective;
        }

        config
    }

    /// Seen-set capacity actually used: `seen_capacity`, raised to at least
    /// twice `fetch_limit` so no id still in the fetch window is evicted.
    pub fn effective_seen_capacity(&self) -> usize {
        let min_capacity = usize::try_from(self.fetch_limit.saturating_mul(2)).unwrap_or(0);
        self.seen_capacity.max(min_capacity)
    }
}

/// Parse `name` with `FromStr`, returning `default` when unset or invalid.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(var = name, value = %raw, error = %e, "Invalid value, using default");
                default
            }
        },
        None => default,
    }
}
