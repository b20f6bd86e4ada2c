// src/pipeline/check.rs

//! A single availability check.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, NotificationKind, State};
use crate::pipeline::TransitionEngine;
use crate::services::{AvailabilityDetector, DeliveryOutcome, Notifier, PageFetcher};
use crate::storage::StateStore;

/// What happened during one run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub previous: State,
    pub state: State,
    pub observed_present: bool,
    /// Kind of notification attempted, if any
    pub notified: Option<NotificationKind>,
    /// Outcome of the delivery attempt, if any
    pub delivery: Option<DeliveryOutcome>,
    /// Whether the new state reached the store
    pub persisted: bool,
}

/// Run one check: load state, fetch, detect, decide, notify, save.
///
/// Configuration and fetch errors abort the run before anything is saved.
/// Notification and save failures are logged and reflected in the report.
pub async fn run_check(
    config: &Config,
    store: &dyn StateStore,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> Result<CheckReport> {
    config.validate()?;

    let url = config.monitor.url.as_str();
    let previous = store.load().await;
    log::info!(
        "Checking {} (last status: {})",
        url,
        previous.status.as_str()
    );

    let body = fetcher.fetch(url).await?;

    let detector = AvailabilityDetector::new(config.monitor.marker.clone());
    let observed_present = detector.detect(&body);
    let seen = if observed_present { "found" } else { "absent" };
    log::info!("Marker {} {}", detector.marker(), seen);

    let engine = TransitionEngine::from_config(config);
    let transition = engine.evaluate(&previous, observed_present, now);

    let (notified, delivery) = match &transition.notification {
        Some(notification) => {
            let outcome = notifier.send(&config.notifier.topic, notification).await;
            if let DeliveryOutcome::Failed { reason } = &outcome {
                log::warn!(
                    "{} notification not delivered: {}",
                    notification.kind,
                    reason
                );
            }
            (Some(notification.kind), Some(outcome))
        }
        None => {
            log::debug!("No notification due");
            (None, None)
        }
    };

    let persisted = match store.save(&transition.state).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to save state: {}", e);
            false
        }
    };

    Ok(CheckReport {
        previous,
        state: transition.state,
        observed_present,
        notified,
        delivery,
        persisted,
    })
}
