//! Alert write path.

use std::sync::Arc;

use airwatch_core::alert::{Location, ViolationCode};
use airwatch_core::types::{DbId, Timestamp};

use crate::error::{MonitorError, MonitorResult};
use crate::store::{AlertProfileStore, AlertStore};

/// Resolves a recipient's alert profile and appends the alert row.
#[derive(Clone)]
pub struct AlertSink {
    profiles: Arc<dyn AlertProfileStore>,
    alerts: Arc<dyn AlertStore>,
}

impl AlertSink {
    pub fn new(profiles: Arc<dyn AlertProfileStore>, alerts: Arc<dyn AlertStore>) -> Self {
        Self { profiles, alerts }
    }

    /// Write one alert for `recipient`.
    ///
    /// Fails with [`MonitorError::RecipientProfileMissing`] when the recipient
    /// has no alert profile yet; nothing is written in that case.
    pub async fn emit(
        &self,
        recipient: &str,
        code: ViolationCode,
        timestamp: Timestamp,
        location: Option<Location>,
    ) -> MonitorResult<DbId> {
        let profile_id = self
            .profiles
            .find_alert_profile_id(recipient)
            .await?
            .ok_or_else(|| MonitorError::RecipientProfileMissing {
                recipient: recipient.to_string(),
            })?;

        let alert_id = self
            .alerts
            .insert_alert(profile_id, timestamp, location, code)
            .await?;

        tracing::debug!(alert_id, profile_id, recipient, code = code.code(), "Alert written");
        Ok(alert_id)
    }
}

impl std::fmt::Debug for AlertSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertSink").finish_non_exhaustive()
    }
}
