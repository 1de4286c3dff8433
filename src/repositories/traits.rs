use crate::error::StoreResult;
use crate::geo::Coordinates;
use crate::models::{Contact, User};

/// Repository for a user's emergency contacts.
///
/// Synchronous by contract: callers get already-committed state and the
/// dispatch core only reads the collection handed to it.
pub trait ContactRepository: Send + Sync {
    /// Load the owner's contacts in list order.
    fn load(&self, owner_email: &str) -> StoreResult<Vec<Contact>>;

    /// Add a contact for the owner.
    fn add(&self, owner_email: &str, contact: Contact) -> StoreResult<()>;

    /// Replace an existing contact (matched by name + phone) with new data.
    fn edit(&self, owner_email: &str, old: &Contact, new: Contact) -> StoreResult<()>;

    /// Delete a contact (matched by name + phone).
    fn delete(&self, owner_email: &str, contact: &Contact) -> StoreResult<()>;
}

/// Repository for registered users and the login session.
pub trait UserRepository: Send + Sync {
    /// Register a new user; fails on duplicate email.
    fn register(&self, user: User) -> StoreResult<()>;

    /// Look a user up by email.
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Persist the last successfully acquired location for a user.
    fn save_location(&self, email: &str, coordinates: Coordinates) -> StoreResult<()>;

    /// Email of the currently logged-in user, if a session exists.
    fn current_session(&self) -> StoreResult<Option<String>>;

    /// Record a login session.
    fn save_session(&self, email: &str) -> StoreResult<()>;

    /// Drop the login session.
    fn clear_session(&self) -> StoreResult<()>;
}
