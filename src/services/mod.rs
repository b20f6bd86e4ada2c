//! Business logic services for a single check.
//!
//! - `detector`: marker test on a page body
//! - `fetcher`: retrieval of the monitored page
//! - `notifier`: best-effort ntfy delivery

pub mod detector;
pub mod fetcher;
pub mod notifier;

pub use detector::AvailabilityDetector;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use notifier::{DeliveryOutcome, Notifier, NtfyNotifier};
