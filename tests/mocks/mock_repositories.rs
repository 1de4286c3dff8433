use sos_beacon::error::{StoreError, StoreResult};
use sos_beacon::geo::Coordinates;
use sos_beacon::models::{Contact, User};
use sos_beacon::repositories::{ContactRepository, UserRepository};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory contact repository for testing.
pub struct MockContactRepository {
    contacts: Mutex<HashMap<String, Vec<Contact>>>,
}

impl MockContactRepository {
    pub fn new() -> Self {
        Self {
            contacts: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the repository with contacts for one owner.
    pub fn with_contacts(self, owner_email: &str, contacts: Vec<Contact>) -> Self {
        self.contacts
            .lock()
            .unwrap()
            .insert(owner_email.to_string(), contacts);
        self
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRepository for MockContactRepository {
    fn load(&self, owner_email: &str) -> StoreResult<Vec<Contact>> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .get(owner_email)
            .cloned()
            .unwrap_or_default())
    }

    fn add(&self, owner_email: &str, contact: Contact) -> StoreResult<()> {
        self.contacts
            .lock()
            .unwrap()
            .entry(owner_email.to_string())
            .or_default()
            .push(contact);
        Ok(())
    }

    fn edit(&self, owner_email: &str, old: &Contact, new: Contact) -> StoreResult<()> {
        let mut contacts = self.contacts.lock().unwrap();
        let list = contacts
            .get_mut(owner_email)
            .ok_or_else(|| StoreError::NotFound(owner_email.to_string()))?;
        let slot = list
            .iter_mut()
            .find(|c| *c == old)
            .ok_or_else(|| StoreError::NotFound(old.name.clone()))?;
        *slot = new;
        Ok(())
    }

    fn delete(&self, owner_email: &str, contact: &Contact) -> StoreResult<()> {
        let mut contacts = self.contacts.lock().unwrap();
        let list = contacts
            .get_mut(owner_email)
            .ok_or_else(|| StoreError::NotFound(owner_email.to_string()))?;
        list.retain(|c| c != contact);
        Ok(())
    }
}

/// In-memory user repository for testing.
pub struct MockUserRepository {
    users: Mutex<HashMap<String, User>>,
    session: Mutex<Option<String>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MockUserRepository {
    fn register(&self, user: User) -> StoreResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    fn save_location(&self, email: &str, coordinates: Coordinates) -> StoreResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::NotFound(email.to_string()))?;
        user.last_location = Some(coordinates);
        Ok(())
    }

    fn current_session(&self) -> StoreResult<Option<String>> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save_session(&self, email: &str) -> StoreResult<()> {
        *self.session.lock().unwrap() = Some(email.to_string());
        Ok(())
    }

    fn clear_session(&self) -> StoreResult<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
