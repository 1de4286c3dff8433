//! Alert service: location refresh and SOS dispatch as background work.

use crate::config::Config;
use crate::dispatch::{DispatchEngine, DispatchReport};
use crate::error::{ServiceError, ServiceResult};
use crate::geo::{Coordinates, LocationAcquirer, ResolvedLocation};
use crate::message;
use crate::repositories::{ContactRepository, UserRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Alert operations exposed to the presentation layer.
///
/// At most one acquisition and one dispatch may be in flight at a time;
/// a second call while one runs fails fast with [`ServiceError::Busy`]
/// instead of racing on the shared location state.
#[async_trait]
pub trait AlertService: Send + Sync {
    /// Acquire the current location and update the last-known value.
    ///
    /// When `owner_email` is given, the resolved location is also persisted
    /// on that user's record. A failed acquisition leaves the last-known
    /// value untouched.
    async fn refresh_location(&self, owner_email: Option<&str>)
        -> ServiceResult<ResolvedLocation>;

    /// Compose the emergency message and dispatch it to every contact of
    /// `owner_email`.
    ///
    /// The caller must have shown the confirmation gate already; this never
    /// prompts.
    async fn send_alert(&self, owner_email: &str, display_name: &str)
        -> ServiceResult<DispatchReport>;

    /// Last successfully acquired coordinates, `(0, 0)` before any success.
    fn last_known(&self) -> Coordinates;
}

/// Default implementation of [`AlertService`].
pub struct AlertServiceImpl {
    contacts: Arc<dyn ContactRepository>,
    users: Arc<dyn UserRepository>,
    acquirer: LocationAcquirer,
    engine: DispatchEngine,
    template: String,
    last_known: Mutex<Coordinates>,
    acquire_gate: tokio::sync::Mutex<()>,
    dispatch_gate: tokio::sync::Mutex<()>,
}

impl AlertServiceImpl {
    /// Create the service.
    pub fn new(
        config: &Config,
        contacts: Arc<dyn ContactRepository>,
        users: Arc<dyn UserRepository>,
        acquirer: LocationAcquirer,
        engine: DispatchEngine,
    ) -> Self {
        Self {
            contacts,
            users,
            acquirer,
            engine,
            template: config.message_template.clone(),
            last_known: Mutex::new(Coordinates::default()),
            acquire_gate: tokio::sync::Mutex::new(()),
            dispatch_gate: tokio::sync::Mutex::new(()),
        }
    }
}

#[async_trait]
impl AlertService for AlertServiceImpl {
    async fn refresh_location(
        &self,
        owner_email: Option<&str>,
    ) -> ServiceResult<ResolvedLocation> {
        let _guard = self
            .acquire_gate
            .try_lock()
            .map_err(|_| ServiceError::Busy)?;

        let resolved = self.acquirer.acquire().await?;
        *self.last_known.lock().unwrap() = resolved.coordinates;

        if let Some(email) = owner_email {
            // Persisting is best-effort; an unknown user just means nobody
            // is logged in yet.
            if let Err(err) = self.users.save_location(email, resolved.coordinates) {
                debug!("Did not persist location for {}: {}", email, err);
            }
        }

        Ok(resolved)
    }

    async fn send_alert(
        &self,
        owner_email: &str,
        display_name: &str,
    ) -> ServiceResult<DispatchReport> {
        let _guard = self
            .dispatch_gate
            .try_lock()
            .map_err(|_| ServiceError::Busy)?;

        let contacts = self.contacts.load(owner_email)?;
        if contacts.is_empty() {
            warn!("No saved contacts for {}", owner_email);
        }

        let coords = self.last_known();
        let text = message::compose(&self.template, display_name, coords);
        Ok(self.engine.dispatch(&text, &contacts).await)
    }

    fn last_known(&self) -> Coordinates {
        *self.last_known.lock().unwrap()
    }
}

/// Run a location refresh as a detached background task.
///
/// The result arrives once on the returned channel; there are no partial
/// updates. The task is not cancelled on application exit.
pub fn spawn_location_refresh(
    service: Arc<dyn AlertService>,
    owner_email: Option<String>,
) -> oneshot::Receiver<ServiceResult<ResolvedLocation>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = service.refresh_location(owner_email.as_deref()).await;
        let _ = tx.send(result);
    });
    rx
}

/// Run a dispatch as a detached background task.
///
/// The full [`DispatchReport`] arrives once on the returned channel after
/// the whole collection has been processed.
pub fn spawn_alert(
    service: Arc<dyn AlertService>,
    owner_email: String,
    display_name: String,
) -> oneshot::Receiver<ServiceResult<DispatchReport>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = service.send_alert(&owner_email, &display_name).await;
        let _ = tx.send(result);
    });
    rx
}
