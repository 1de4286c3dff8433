//! Error types for the SOS Beacon core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur while acquiring the current location.
#[derive(Error, Debug)]
pub enum GeoError {
    /// No browser-launch mechanism is available on this host
    #[error("No supported browser-launch mechanism: {0}")]
    ProbeUnavailable(String),

    /// The consent probe did not receive coordinates within the bound
    #[error("Consent probe timed out")]
    ConsentTimeout,

    /// The local listener could not be bound or served
    #[error("Consent probe I/O error: {0}")]
    ProbeIo(#[from] std::io::Error),

    /// HTTP request to the geolocation endpoint failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The geolocation endpoint returned a body without usable coordinates
    #[error("Malformed geolocation response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur when handing a message to a channel.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The URI could not be handed to the OS
    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    /// The channel is not usable on this host
    #[error("Channel unsupported: {0}")]
    Unsupported(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors that can occur in the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file I/O failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored state could not be decoded
    #[error("Store decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same key already exists
    #[error("Already exists: {0}")]
    Duplicate(String),
}

/// Errors surfaced by the service layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Another acquisition or dispatch is already in flight
    #[error("Operation already in progress")]
    Busy,

    /// All location sources failed
    #[error("Could not get location: {0}")]
    Acquisition(#[from] GeoError),

    /// Persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with GeoError
pub type GeoResult<T> = Result<T, GeoError>;

/// Convenience type alias for Results with TransportError
pub type TransportResult<T> = Result<T, TransportError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeoError::ConsentTimeout;
        assert_eq!(err.to_string(), "Consent probe timed out");

        let err = TransportError::LaunchFailed("no handler".to_string());
        assert_eq!(err.to_string(), "Launch failed: no handler");

        let err = StoreError::NotFound("contact".to_string());
        assert_eq!(err.to_string(), "Not found: contact");

        let err = ServiceError::Busy;
        assert_eq!(err.to_string(), "Operation already in progress");
    }

    #[test]
    fn test_geo_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let err: GeoError = io.into();
        assert!(err.to_string().contains("taken"));
    }
}
