//! Data models for SOS Beacon entities.
//!
//! This module contains the data structures representing emergency contacts
//! and registered users.

pub mod contact;
pub mod user;

pub use contact::Contact;
pub use user::User;
