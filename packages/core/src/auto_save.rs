//! Auto-save service for session plans
//!
//! Periodically saves the plan being edited so a crash mid-layout does not
//! lose the breaks placed so far.

use crate::{RespiteResult, SessionPlan};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Configuration for auto-save behavior
#[derive(Debug, Clone)]
pub struct AutoSaveConfig {
    /// How often to auto-save while editing
    pub interval: Duration,
    /// Whether auto-save is enabled
    pub enabled: bool,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            enabled: true,
        }
    }
}

/// Service that manages auto-saving session plans
pub struct AutoSaveService {
    config: AutoSaveConfig,
    last_save: Option<SystemTime>,
    is_saving: Arc<Mutex<bool>>,
}

impl AutoSaveService {
    /// Create a new auto-save service with default config
    pub fn new() -> Self {
        Self::with_config(AutoSaveConfig::default())
    }

    /// Create a new auto-save service with custom config
    pub fn with_config(config: AutoSaveConfig) -> Self {
        Self {
            config,
            last_save: None,
            is_saving: Arc::new(Mutex::new(false)),
        }
    }

    /// Check if auto-save is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enable auto-save
    pub fn enable(&mut self) {
        self.config.enabled = true;
        info!("Auto-save enabled");
    }

    /// Disable auto-save
    pub fn disable(&mut self) {
        self.config.enabled = false;
        info!("Auto-save disabled");
    }

    /// Set auto-save interval
    pub fn set_interval(&mut self, interval: Duration) {
        self.config.interval = interval;
        debug!("Auto-save interval set to {:?}", interval);
    }

    /// Save the plan unconditionally. A failed save does not count as a
    /// save: `last_save` is only stamped on success, so the next
    /// [`maybe_save`](Self::maybe_save) retries immediately.
    pub async fn save_now(&mut self, plan: &SessionPlan) -> RespiteResult<()> {
        let mut saving = self.is_saving.lock().await;
        *saving = true;

        let result = plan.save();

        *saving = false;
        drop(saving);
        result?;

        self.last_save = Some(SystemTime::now());
        debug!("Plan {} auto-saved", plan.id);
        Ok(())
    }

    /// Save the plan if auto-save is enabled and the configured interval
    /// has elapsed since the last save. Returns whether a save happened.
    pub async fn maybe_save(&mut self, plan: &SessionPlan) -> RespiteResult<bool> {
        if !self.config.enabled {
            return Ok(false);
        }

        if let Some(elapsed) = self.time_since_last_save() {
            if elapsed < self.config.interval {
                return Ok(false);
            }
        }

        self.save_now(plan).await?;
        Ok(true)
    }

    /// Check if a save is currently in progress
    pub async fn is_saving(&self) -> bool {
        *self.is_saving.lock().await
    }

    /// Get time since last save
    pub fn time_since_last_save(&self) -> Option<Duration> {
        self.last_save
            .map(|t| SystemTime::now().duration_since(t).unwrap_or_default())
    }
}

impl Default for AutoSaveService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeValue;

    #[test]
    fn test_auto_save_config_default() {
        let config = AutoSaveConfig::default();
        assert_eq!(config.interval, Duration::from_secs(10));
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn test_auto_save_service_new() {
        let service = AutoSaveService::new();
        assert!(service.is_enabled());
        assert!(service.time_since_last_save().is_none());
        assert!(!service.is_saving().await);
    }

    #[tokio::test]
    async fn test_auto_save_toggle() {
        let mut service = AutoSaveService::new();
        service.disable();
        assert!(!service.is_enabled());
        service.enable();
        assert!(service.is_enabled());
    }

    #[tokio::test]
    async fn test_maybe_save_skips_when_disabled() {
        let mut service = AutoSaveService::with_config(AutoSaveConfig {
            interval: Duration::from_secs(0),
            enabled: false,
        });
        let plan = SessionPlan::new("Skip", TimeValue::new(1, 0, 0));
        assert!(!service.maybe_save(&plan).await.unwrap());
        assert!(service.time_since_last_save().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_is_not_stamped() {
        let mut service = AutoSaveService::new();
        // A NUL byte in the id makes the plan file path unwritable.
        let mut plan = SessionPlan::new("Broken", TimeValue::new(1, 0, 0));
        plan.id = "bad\0id".to_string();

        assert!(service.save_now(&plan).await.is_err());
        assert!(service.time_since_last_save().is_none());
        assert!(!service.is_saving().await);

        // With no successful save on record, maybe_save retries at once
        // instead of waiting out the interval (and fails the same way).
        assert!(service.maybe_save(&plan).await.is_err());
    }

    #[tokio::test]
    async fn test_maybe_save_honors_interval() {
        let mut service = AutoSaveService::with_config(AutoSaveConfig {
            interval: Duration::from_secs(3600),
            enabled: true,
        });
        let plan = SessionPlan::new("Interval", TimeValue::new(1, 0, 0));

        // First call has no prior save, so it writes.
        assert!(service.maybe_save(&plan).await.unwrap());
        // Second call is inside the interval window.
        assert!(!service.maybe_save(&plan).await.unwrap());

        // Cleanup: the first call wrote into the default plans dir.
        let _ = std::fs::remove_file(plan.plan_file());
    }
}
