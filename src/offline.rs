//! Offline cache registration.
//!
//! The page asks the host's service-worker container to register the cache
//! script once loaded. Success and failure are only logged; the page works
//! the same either way.

use crate::config::OfflineSettings;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("service worker registration failed: {0}")]
pub struct RegistrationError(pub String);

/// A host that can register service workers.
pub trait ServiceWorkers {
    fn register(&mut self, script_url: &str) -> Result<(), RegistrationError>;
}

/// Outcome of [`register_offline_cache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered,
    Failed(RegistrationError),
    /// The host has no service-worker support.
    Unsupported,
    Disabled,
}

impl Registration {
    pub fn label(&self) -> &'static str {
        match self {
            Registration::Registered => "registered",
            Registration::Failed(_) => "failed",
            Registration::Unsupported => "unsupported",
            Registration::Disabled => "disabled",
        }
    }
}

/// In-memory host that records registrations, optionally failing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingServiceWorkers {
    pub registered: Vec<String>,
    pub fail_with: Option<String>,
}

impl ServiceWorkers for RecordingServiceWorkers {
    fn register(&mut self, script_url: &str) -> Result<(), RegistrationError> {
        if let Some(reason) = &self.fail_with {
            return Err(RegistrationError(reason.clone()));
        }
        self.registered.push(script_url.to_string());
        Ok(())
    }
}

pub fn register_offline_cache(
    host: Option<&mut dyn ServiceWorkers>,
    settings: &OfflineSettings,
) -> Registration {
    if !settings.enabled {
        return Registration::Disabled;
    }
    let Some(host) = host else {
        return Registration::Unsupported;
    };
    match host.register(&settings.script_url) {
        Ok(()) => {
            info!(script = %settings.script_url, "service worker registered");
            Registration::Registered
        }
        Err(err) => {
            warn!(script = %settings.script_url, error = %err, "service worker registration failed");
            Registration::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_configured_script() {
        let mut host = RecordingServiceWorkers::default();
        let outcome = register_offline_cache(Some(&mut host), &OfflineSettings::default());
        assert_eq!(outcome, Registration::Registered);
        assert_eq!(host.registered, vec!["/sw.js"]);
    }

    #[test]
    fn failure_is_reported_not_raised() {
        let mut host = RecordingServiceWorkers {
            fail_with: Some("insecure origin".into()),
            ..Default::default()
        };
        let outcome = register_offline_cache(Some(&mut host), &OfflineSettings::default());
        assert_eq!(
            outcome,
            Registration::Failed(RegistrationError("insecure origin".into()))
        );
        assert_eq!(outcome.label(), "failed");
        assert!(host.registered.is_empty());
    }

    #[test]
    fn missing_support_and_disabled_are_noops() {
        assert_eq!(
            register_offline_cache(None, &OfflineSettings::default()),
            Registration::Unsupported
        );
        let mut host = RecordingServiceWorkers::default();
        let settings = OfflineSettings {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(
            register_offline_cache(Some(&mut host), &settings),
            Registration::Disabled
        );
        assert!(host.registered.is_empty());
    }
}
