//! Location acquisition.
//!
//! Obtains the user's current coordinates, preferring an interactive
//! browser consent flow over a network IP-geolocation fallback:
//!
//! 1. Bind an ephemeral local listener, open the served page in the system
//!    browser, and wait (bounded) for the page to POST coordinates back.
//! 2. If the probe cannot start, the browser cannot launch, or the wait
//!    times out, issue one request to a public IP-geolocation endpoint.
//! 3. If that also fails, the whole acquisition fails once; the caller
//!    keeps whatever coordinates it already had.

pub mod consent;
pub mod fallback;

pub use consent::ConsentProbe;
pub use fallback::IpGeoClient;

use crate::config::Config;
use crate::error::{GeoError, GeoResult};
use crate::launch::UriLauncher;
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A geographic position.
///
/// Defaults to `(0.0, 0.0)` before the first successful acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Which source produced a resolved location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// The user granted browser geolocation and the page posted back
    BrowserConsent,

    /// The IP-geolocation fallback answered
    IpLookup,
}

/// A successful acquisition: the coordinates and where they came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub source: LocationSource,
}

/// Orchestrates the consent probe and the IP fallback.
///
/// One call runs the full state machine: consent first, fallback second,
/// error only when both paths are exhausted. Calls are not reentrant; the
/// service layer serializes them behind a guard.
pub struct LocationAcquirer {
    launcher: Arc<dyn UriLauncher>,
    fallback: IpGeoClient,
    consent_timeout: Duration,
}

impl LocationAcquirer {
    /// Create an acquirer from configuration.
    pub fn new(config: &Config, launcher: Arc<dyn UriLauncher>, metrics: Metrics) -> Self {
        Self {
            launcher,
            fallback: IpGeoClient::new(config, metrics),
            consent_timeout: Duration::from_secs(config.consent_timeout_secs),
        }
    }

    /// Override the fallback client (tests point it at a mock server).
    #[doc(hidden)]
    pub fn with_fallback(mut self, fallback: IpGeoClient) -> Self {
        self.fallback = fallback;
        self
    }

    /// Override the consent wait bound.
    #[doc(hidden)]
    pub fn with_consent_timeout(mut self, timeout: Duration) -> Self {
        self.consent_timeout = timeout;
        self
    }

    /// Acquire the current location.
    ///
    /// Returns the consent-probe coordinates when the user answers within
    /// the bound, otherwise the result of a single IP-geolocation lookup.
    /// Errors only when both sources fail.
    pub async fn acquire(&self) -> GeoResult<ResolvedLocation> {
        match self.try_consent().await {
            Ok(coordinates) => {
                info!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Location resolved via browser consent"
                );
                Ok(ResolvedLocation {
                    coordinates,
                    source: LocationSource::BrowserConsent,
                })
            }
            Err(err) => {
                warn!("Consent probe did not resolve ({}), trying IP lookup", err);
                let coordinates = self.fallback.lookup().await?;
                info!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Location resolved via IP fallback"
                );
                Ok(ResolvedLocation {
                    coordinates,
                    source: LocationSource::IpLookup,
                })
            }
        }
    }

    /// Run the consent sub-probe once.
    ///
    /// The probe's listener is owned by this call and is released before it
    /// returns on every path: success, timeout, and browser-launch failure.
    async fn try_consent(&self) -> GeoResult<Coordinates> {
        let probe = ConsentProbe::bind().await?;
        let url = probe.url();
        debug!("Consent probe listening at {}", url);

        let launcher = self.launcher.clone();
        let launch_url = url.clone();
        tokio::task::spawn_blocking(move || launcher.open_native(&launch_url))
            .await
            .map_err(|e| GeoError::ProbeUnavailable(format!("Task join error: {}", e)))?
            .map_err(|e| GeoError::ProbeUnavailable(e.to_string()))?;

        probe.wait_for_coords(self.consent_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_default_is_origin() {
        let coords = Coordinates::default();
        assert_eq!(coords, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_coordinates_serde_roundtrip() {
        let coords = Coordinates::new(12.9, 77.6);
        let json = serde_json::to_string(&coords).unwrap();
        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coords);
    }
}
