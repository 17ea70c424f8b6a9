// Notification service
// Collects rejected-gesture alerts that expire on their own

use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

use crate::models::settings::EngineSettings;
use crate::services::resolver::Rejection;

/// Receives every rejection the editing session reports
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, rejection: Rejection);
}

/// One user-visible alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: u64,
    pub rejection: Rejection,
    pub message: String,
    pub raised_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Alert {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Stack of alerts, each independently dismissible and expiring after a TTL
#[derive(Debug, Clone)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    ttl: Duration,
    next_id: u64,
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl AlertQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            alerts: Vec::new(),
            ttl,
            next_id: 1,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.alert_ttl())
    }

    /// Raise an alert at a given time and return its id
    pub fn push_at(&mut self, rejection: Rejection, now: NaiveDateTime) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.alerts.push(Alert {
            id,
            rejection,
            message: rejection.to_string(),
            raised_at: now,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Close an alert early; false if it was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Drop expired alerts, returning how many were removed
    pub fn prune(&mut self, now: NaiveDateTime) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|alert| !alert.is_expired(now));
        before - self.alerts.len()
    }

    /// Alerts still visible at `now`, oldest first
    pub fn active(&self, now: NaiveDateTime) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |alert| !alert.is_expired(now))
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl NotificationSink for AlertQueue {
    fn notify(&mut self, rejection: Rejection) {
        log::warn!("Gesture rejected: {}", rejection.code());
        let now = Local::now().naive_local();
        self.prune(now);
        self.push_at(rejection, now);
    }
}
