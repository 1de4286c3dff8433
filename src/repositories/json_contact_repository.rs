//! JSON-file-backed contact repository.

use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::ContactRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// On-disk shape: contacts keyed by owner email.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ContactFile {
    contacts: HashMap<String, Vec<Contact>>,
}

/// Contact storage in a single JSON file under the data directory.
///
/// Writes go through a temp file + rename so a crash mid-write never
/// leaves a truncated store behind.
pub struct JsonContactRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonContactRepository {
    /// Open (or lazily create) the store at `dir/contacts.json`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join("contacts.json"),
            lock: Mutex::new(()),
        })
    }

    fn read_file(&self) -> StoreResult<ContactFile> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ContactFile::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_file(&self, file: &ContactFile) -> StoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ContactRepository for JsonContactRepository {
    fn load(&self, owner_email: &str) -> StoreResult<Vec<Contact>> {
        let _guard = self.lock.lock().unwrap();
        let file = self.read_file()?;
        Ok(file.contacts.get(owner_email).cloned().unwrap_or_default())
    }

    fn add(&self, owner_email: &str, contact: Contact) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut file = self.read_file()?;
        file.contacts
            .entry(owner_email.to_string())
            .or_default()
            .push(contact);
        self.write_file(&file)
    }

    fn edit(&self, owner_email: &str, old: &Contact, new: Contact) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut file = self.read_file()?;
        let list = file
            .contacts
            .get_mut(owner_email)
            .ok_or_else(|| StoreError::NotFound(format!("contacts for {}", owner_email)))?;
        let slot = list
            .iter_mut()
            .find(|c| *c == old)
            .ok_or_else(|| StoreError::NotFound(format!("contact {}", old.name)))?;
        *slot = new;
        self.write_file(&file)
    }

    fn delete(&self, owner_email: &str, contact: &Contact) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut file = self.read_file()?;
        let list = file
            .contacts
            .get_mut(owner_email)
            .ok_or_else(|| StoreError::NotFound(format!("contacts for {}", owner_email)))?;
        let before = list.len();
        list.retain(|c| c != contact);
        if list.len() == before {
            return Err(StoreError::NotFound(format!("contact {}", contact.name)));
        }
        self.write_file(&file)
    }
}
