//! Per-recipient alert throttling.
//!
//! Tracks when the last alert was emitted so a recipient is not notified more
//! than once per cooldown window, however many violations occur. Suppressed
//! violations are dropped for that pass, not queued.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoreError;
use crate::sensor::SensorCategory;
use crate::types::Timestamp;

/// Minimum interval between two alerts for the same cooldown key.
pub const DEFAULT_ALERT_COOLDOWN: Duration = Duration::from_secs(60);

/// Granularity of the cooldown key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CooldownScope {
    /// One window per recipient, shared by every sensor category.
    #[default]
    Recipient,
    /// One window per (recipient, category) pair.
    RecipientCategory,
}

impl CooldownScope {
    /// Build the throttle key for a recipient and the category that violated.
    pub fn key(self, recipient: &str, category: SensorCategory) -> CooldownKey {
        match self {
            Self::Recipient => CooldownKey {
                recipient: recipient.to_string(),
                category: None,
            },
            Self::RecipientCategory => CooldownKey {
                recipient: recipient.to_string(),
                category: Some(category),
            },
        }
    }
}

impl FromStr for CooldownScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recipient" => Ok(Self::Recipient),
            "recipient_category" => Ok(Self::RecipientCategory),
            other => Err(CoreError::Validation(format!(
                "unknown cooldown scope '{other}'"
            ))),
        }
    }
}

/// Key the throttle is indexed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub recipient: String,
    pub category: Option<SensorCategory>,
}

impl fmt::Display for CooldownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{}/{category}", self.recipient),
            None => f.write_str(&self.recipient),
        }
    }
}

/// Last successful emission time per cooldown key.
#[derive(Debug)]
pub struct CooldownThrottle {
    last_emission: HashMap<CooldownKey, Timestamp>,
    window: chrono::Duration,
}

impl Default for CooldownThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_COOLDOWN)
    }
}

impl CooldownThrottle {
    /// Create an empty throttle with the given quiet period.
    pub fn new(window: Duration) -> Self {
        Self {
            last_emission: HashMap::new(),
            window: chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Whether an alert for `key` may be emitted at `now`.
    ///
    /// True when nothing has been recorded for the key, or at least one full
    /// window has elapsed since the last emission. Does not record anything.
    pub fn allow(&self, key: &CooldownKey, now: Timestamp) -> bool {
        match self.last_emission.get(key) {
            Some(last) => now.signed_duration_since(*last) >= self.window,
            None => true,
        }
    }

    /// Record a successful emission, overwriting any previous time.
    pub fn record_emission(&mut self, key: CooldownKey, at: Timestamp) {
        self.last_emission.insert(key, at);
    }

    pub fn last_emission(&self, key: &CooldownKey) -> Option<Timestamp> {
        self.last_emission.get(key).copied()
    }

    pub fn window(&self) -> chrono::Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn key(recipient: &str) -> CooldownKey {
        CooldownScope::Recipient.key(recipient, SensorCategory::Temperature)
    }

    #[test]
    fn unknown_recipient_is_allowed() {
        let throttle = CooldownThrottle::default();
        assert!(throttle.allow(&key("r1"), at(0)));
    }

    #[test]
    fn suppresses_within_window() {
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(key("r1"), at(0));
        assert!(!throttle.allow(&key("r1"), at(1)));
        assert!(!throttle.allow(&key("r1"), at(59)));
    }

    #[test]
    fn allows_once_window_elapsed() {
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(key("r1"), at(0));
        assert!(throttle.allow(&key("r1"), at(60)));
        assert!(throttle.allow(&key("r1"), at(600)));
    }

    #[test]
    fn recipients_are_independent() {
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(key("r1"), at(0));
        assert!(throttle.allow(&key("r2"), at(1)));
    }

    #[test]
    fn record_overwrites_previous() {
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(key("r1"), at(0));
        throttle.record_emission(key("r1"), at(100));
        assert_eq!(throttle.last_emission(&key("r1")), Some(at(100)));
        assert!(!throttle.allow(&key("r1"), at(130)));
    }

    #[test]
    fn recipient_scope_shares_window_across_categories() {
        let scope = CooldownScope::Recipient;
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(scope.key("r1", SensorCategory::Temperature), at(0));
        assert!(!throttle.allow(&scope.key("r1", SensorCategory::Ozone), at(1)));
    }

    #[test]
    fn category_scope_separates_windows() {
        let scope = CooldownScope::RecipientCategory;
        let mut throttle = CooldownThrottle::default();
        throttle.record_emission(scope.key("r1", SensorCategory::Temperature), at(0));
        assert!(throttle.allow(&scope.key("r1", SensorCategory::Ozone), at(1)));
        assert!(!throttle.allow(&scope.key("r1", SensorCategory::Temperature), at(1)));
    }

    #[test]
    fn parses_scope_names() {
        assert_eq!("recipient".parse::<CooldownScope>(), Ok(CooldownScope::Recipient));
        assert_eq!(
            "RECIPIENT_CATEGORY".parse::<CooldownScope>(),
            Ok(CooldownScope::RecipientCategory)
        );
        assert!("sensor".parse::<CooldownScope>().is_err());
    }
}
