//! Contact model representing one emergency contact.

use serde::{Deserialize, Serialize};

/// An emergency contact owned by a user.
///
/// The phone number is kept raw as entered. Normalization happens at
/// dispatch time so that a contact saved with a bad number still shows up
/// in the list (and in the dispatch report) instead of vanishing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Display name of the contact
    pub name: String,

    /// Phone number as entered by the user
    pub phone_raw: String,
}

impl Contact {
    /// Create a new contact.
    pub fn new(name: impl Into<String>, phone_raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_raw: phone_raw.into(),
        }
    }
}
