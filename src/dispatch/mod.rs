//! Dispatch engine: fan a composed message out to every contact.
//!
//! Contacts are processed strictly sequentially. Concurrency here would
//! scramble report ordering and overwhelm the host's browser-launch
//! mechanism, which silently drops rapid launches.

pub mod channel;

pub use channel::{
    default_channels, AppSchemeChannel, ChannelKind, MessageChannel, ShellOpenChannel, WebChannel,
};

use crate::config::Config;
use crate::domain::NormalizedPhone;
use crate::launch::UriLauncher;
use crate::metrics::Metrics;
use crate::models::Contact;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why a contact could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// The phone number failed normalization; no channel was attempted
    InvalidNumber,

    /// Every channel in the chain failed
    CouldNotOpen,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::CouldNotOpen => write!(f, "could not open"),
        }
    }
}

/// The result of one attempted contact.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// The contact as handed to the engine
    pub contact: Contact,

    /// The channel that carried the message, when one succeeded
    pub channel_used: Option<ChannelKind>,

    /// Why the contact was not reached, when none did
    pub failure: Option<DispatchFailure>,
}

/// Aggregate result of one dispatch run.
///
/// Invariant: `opened_count + failed.len()` equals the number of contacts
/// handed in; `failed` preserves contact order.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Contacts for which some channel was successfully invoked
    pub opened_count: usize,

    /// Contacts that were not reached, in contact order
    pub failed: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// One-line human summary for the status surface.
    pub fn summary(&self) -> String {
        let mut text = format!("Opened messaging tabs for {} contact(s).", self.opened_count);
        if !self.failed.is_empty() {
            text.push_str(&format!(
                " Skipped {} invalid/failed contact(s).",
                self.failed.len()
            ));
        }
        text
    }
}

/// Walks the contact collection and the channel chain.
pub struct DispatchEngine {
    channels: Vec<Box<dyn MessageChannel>>,
    pacing: Duration,
    metrics: Metrics,
}

impl DispatchEngine {
    /// Create an engine with an explicit channel chain.
    pub fn new(channels: Vec<Box<dyn MessageChannel>>, pacing: Duration, metrics: Metrics) -> Self {
        Self {
            channels,
            pacing,
            metrics,
        }
    }

    /// Create an engine with the production channel chain.
    pub fn with_defaults(config: &Config, launcher: Arc<dyn UriLauncher>, metrics: Metrics) -> Self {
        Self::new(
            default_channels(launcher),
            Duration::from_millis(config.pacing_ms),
            metrics,
        )
    }

    /// Dispatch `message` to every contact, sequentially.
    ///
    /// The caller must already hold the user's explicit confirmation; the
    /// engine never prompts. An empty collection returns immediately with
    /// zero channel attempts. Once started, the whole collection is always
    /// processed; one contact's failure never aborts the run.
    pub async fn dispatch(&self, message: &str, contacts: &[Contact]) -> DispatchReport {
        let mut report = DispatchReport::default();
        if contacts.is_empty() {
            return report;
        }

        self.metrics.record_dispatch_run();
        let encoded = urlencoding::encode(message).into_owned();
        info!("Dispatching to {} contact(s)", contacts.len());

        for (index, contact) in contacts.iter().enumerate() {
            let phone = match NormalizedPhone::new(contact.phone_raw.trim()) {
                Ok(phone) => phone,
                Err(err) => {
                    warn!("Skipping {}: {}", contact.name, err);
                    report.failed.push(DispatchOutcome {
                        contact: contact.clone(),
                        channel_used: None,
                        failure: Some(DispatchFailure::InvalidNumber),
                    });
                    continue;
                }
            };

            match self.try_channels(&phone, &encoded) {
                Some(kind) => {
                    debug!("Opened {} for {} via {}", phone, contact.name, kind);
                    report.opened_count += 1;
                    // Hosts serialize new-tab creation; pace the launches so
                    // none get silently dropped. No delay after the last one.
                    if index + 1 < contacts.len() {
                        tokio::time::sleep(self.pacing).await;
                    }
                }
                None => {
                    warn!("Every channel failed for {}", contact.name);
                    report.failed.push(DispatchOutcome {
                        contact: contact.clone(),
                        channel_used: None,
                        failure: Some(DispatchFailure::CouldNotOpen),
                    });
                }
            }
        }

        info!(
            opened = report.opened_count,
            failed = report.failed.len(),
            "Dispatch complete"
        );
        report
    }

    /// Try the chain in priority order; first success wins. Channel errors
    /// are consumed here and only counted.
    fn try_channels(&self, phone: &NormalizedPhone, encoded_message: &str) -> Option<ChannelKind> {
        for channel in &self.channels {
            self.metrics.record_channel_attempt();
            match channel.open(phone, encoded_message) {
                Ok(()) => return Some(channel.kind()),
                Err(err) => {
                    debug!("Channel {} failed: {}", channel.kind(), err);
                    self.metrics.record_channel_failure();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_strings() {
        assert_eq!(DispatchFailure::InvalidNumber.to_string(), "invalid number");
        assert_eq!(DispatchFailure::CouldNotOpen.to_string(), "could not open");
    }

    #[test]
    fn test_report_summary() {
        let report = DispatchReport {
            opened_count: 2,
            failed: vec![DispatchOutcome {
                contact: Contact::new("Ravi", "12345"),
                channel_used: None,
                failure: Some(DispatchFailure::InvalidNumber),
            }],
        };
        let summary = report.summary();
        assert!(summary.contains("2 contact(s)"));
        assert!(summary.contains("Skipped 1"));
    }
}
