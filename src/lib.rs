//! SOS Beacon - a personal emergency-alert desktop utility core.
//!
//! For a logged-in user the crate (a) determines the current geographic
//! position via a consent-based in-browser location probe with an
//! IP-geolocation fallback, and (b) fans a prepared distress message out to
//! every registered contact across a prioritized chain of launch channels,
//! tolerating per-channel failures and reporting exactly which contacts
//! were and were not reached.
//!
//! # Architecture
//!
//! - **domain**: validated value objects (the normalized phone number)
//! - **models**: contacts and users
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **geo**: location acquisition (consent probe + IP fallback)
//! - **message**: emergency message composition
//! - **dispatch**: per-contact channel-chain dispatch and reporting
//! - **launch**: handing URIs to the operating system
//! - **repositories**: JSON-file persistence collaborators
//! - **credentials**: salted password hashing
//! - **services**: background orchestration over all of the above
//! - **metrics**: counters for acquisition and dispatch activity

pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod geo;
pub mod launch;
pub mod message;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use dispatch::{
    ChannelKind, DispatchEngine, DispatchFailure, DispatchOutcome, DispatchReport, MessageChannel,
};
pub use error::{ConfigError, GeoError, ServiceError, StoreError, TransportError};
pub use geo::{Coordinates, IpGeoClient, LocationAcquirer, LocationSource, ResolvedLocation};
pub use launch::{SystemUriLauncher, UriLauncher};
pub use metrics::Metrics;
pub use models::{Contact, User};
pub use repositories::{
    ContactRepository, JsonContactRepository, JsonUserRepository, UserRepository,
};
pub use services::{
    spawn_alert, spawn_location_refresh, AlertService, AlertServiceImpl, RegisterParams,
    UserService,
};
