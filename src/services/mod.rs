//! Application service layer.
//!
//! Services orchestrate the acquisition and dispatch cores over the
//! repositories, and provide the single-shot completion channels the
//! presentation layer observes.

mod alert_service;
mod user_service;

pub use alert_service::{
    spawn_alert, spawn_location_refresh, AlertService, AlertServiceImpl,
};
pub use user_service::{RegisterParams, UserService};
