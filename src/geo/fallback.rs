//! Fallback sub-probe: one-shot IP-geolocation lookup.
//!
//! A synchronous `ureq` client driven from async contexts via
//! `tokio::task::spawn_blocking`. Single attempt, no retry; when this
//! fails the whole acquisition has failed.

use crate::config::Config;
use crate::error::{GeoError, GeoResult};
use crate::geo::Coordinates;
use crate::metrics::Metrics;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Response from the IP-geolocation endpoint.
///
/// Only `lat` and `lon` matter; endpoints wrap them in whatever envelope
/// they like and serde skips the rest. Field order is irrelevant.
#[derive(Debug, Deserialize)]
struct IpGeoResponse {
    lat: f64,
    lon: f64,
}

/// HTTP client for the public IP-geolocation endpoint.
#[derive(Clone)]
pub struct IpGeoClient {
    /// Endpoint URL
    endpoint: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl IpGeoClient {
    /// Create a client from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            endpoint: config.geo_endpoint.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a client with a custom endpoint (useful for testing).
    #[doc(hidden)]
    pub fn with_endpoint(endpoint: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            endpoint,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Look up coordinates for the host's public IP.
    pub async fn lookup(&self) -> GeoResult<Coordinates> {
        let client = self.clone();

        tokio::task::spawn_blocking(move || client.lookup_blocking())
            .await
            .map_err(|e| GeoError::HttpError(format!("Task join error: {}", e)))?
    }

    /// Blocking lookup; runs on the spawn_blocking pool.
    fn lookup_blocking(&self) -> GeoResult<Coordinates> {
        let start = Instant::now();
        debug!("GET {}", self.endpoint);

        let result = self.agent.get(&self.endpoint).call();
        self.metrics.record_geo_request();

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.metrics.record_geo_error();
                return Err(GeoError::HttpError(err.to_string()));
            }
        };

        let parsed: Result<IpGeoResponse, _> = response.into_json();
        let duration = start.elapsed();

        match parsed {
            Ok(body) => {
                debug!("IP geolocation answered in {:?}", duration);
                Ok(Coordinates::new(body.lat, body.lon))
            }
            Err(err) => {
                self.metrics.record_geo_error();
                Err(GeoError::MalformedResponse(err.to_string()))
            }
        }
    }
}
