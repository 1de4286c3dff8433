//! User model for the registered account.

use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user of the application.
///
/// `password_hash` holds the salted hash produced by the credentials
/// module, never a plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Full name, substituted into the emergency message template
    pub full_name: String,

    /// Kind of government ID provided at registration
    pub id_type: String,

    /// ID number matching `id_type`
    pub id_number: String,

    /// Email address; unique key for login and contact ownership
    pub email: String,

    /// User's own phone number
    pub phone: String,

    /// Salted password hash (`iterations:salt:hash`, base64 fields)
    pub password_hash: String,

    /// When the account was created
    pub registered_at: DateTime<Utc>,

    /// Last successfully acquired location, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location: Option<Coordinates>,
}
