//! Persistence layer.
//!
//! The core treats storage as an external collaborator: it only reads the
//! already-committed collections handed to it. Traits keep the JSON-file
//! implementations swappable for mocks in tests.

mod json_contact_repository;
mod json_user_repository;
pub mod traits;

pub use json_contact_repository::JsonContactRepository;
pub use json_user_repository::JsonUserRepository;
pub use traits::{ContactRepository, UserRepository};
