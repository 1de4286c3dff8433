//! NormalizedPhone value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dispatch-ready phone number in canonical digits-only form.
///
/// Construction strips every non-digit character from the raw input and
/// validates the remainder. The canonical form must carry a country code,
/// so the total length has to fall in 11..=15 digits. A bare 10-digit
/// number is always rejected: the country code is ambiguous and is never
/// guessed on the user's behalf.
///
/// # Example
///
/// ```
/// use sos_beacon::domain::NormalizedPhone;
///
/// let phone = NormalizedPhone::new("+91 98765-43210").unwrap();
/// assert_eq!(phone.as_str(), "919876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    /// Normalize a raw phone string, validating the result.
    ///
    /// # Validation Rules
    ///
    /// - After stripping non-digits, the result must not be empty
    /// - Length must be between 10 and 15 digits
    /// - Exactly 10 digits is rejected (missing country code)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` with the original raw input
    /// if normalization fails.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.is_empty() || digits.len() < 10 || digits.len() > 15 {
            return Err(ValidationError::InvalidPhone(raw));
        }
        // 10 digits means the user omitted the country code. Reject so the
        // contact gets fixed instead of silently guessing a region.
        if digits.len() == 10 {
            return Err(ValidationError::InvalidPhone(raw));
        }

        Ok(Self(digits))
    }

    /// Get the canonical digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as the canonical string
impl Serialize for NormalizedPhone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for NormalizedPhone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NormalizedPhone::new(s).map_err(serde::de::Error::custom)
    }
}

// Display support
impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
