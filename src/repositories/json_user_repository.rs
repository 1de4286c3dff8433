//! JSON-file-backed user repository with a plain-text session marker.

use crate::error::{StoreError, StoreResult};
use crate::geo::Coordinates;
use crate::models::User;
use crate::repositories::UserRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// On-disk shape: users keyed by email.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserFile {
    users: HashMap<String, User>,
}

/// User storage in `dir/users.json`, session in `dir/session.txt`.
///
/// The session file holds just the logged-in email, mirroring how the
/// desktop app remembers who to greet between launches.
pub struct JsonUserRepository {
    users_path: PathBuf,
    session_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonUserRepository {
    /// Open (or lazily create) the store under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            users_path: dir.join("users.json"),
            session_path: dir.join("session.txt"),
            lock: Mutex::new(()),
        })
    }

    fn read_file(&self) -> StoreResult<UserFile> {
        match fs::read(&self.users_path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(UserFile::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_file(&self, file: &UserFile) -> StoreResult<()> {
        let tmp = self.users_path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(file)?)?;
        fs::rename(&tmp, &self.users_path)?;
        Ok(())
    }
}

impl UserRepository for JsonUserRepository {
    fn register(&self, user: User) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut file = self.read_file()?;
        if file.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }
        file.users.insert(user.email.clone(), user);
        self.write_file(&file)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let _guard = self.lock.lock().unwrap();
        let file = self.read_file()?;
        Ok(file.users.get(email).cloned())
    }

    fn save_location(&self, email: &str, coordinates: Coordinates) -> StoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut file = self.read_file()?;
        let user = file
            .users
            .get_mut(email)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", email)))?;
        user.last_location = Some(coordinates);
        self.write_file(&file)
    }

    fn current_session(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.session_path) {
            Ok(email) => {
                let email = email.trim().to_string();
                Ok(if email.is_empty() { None } else { Some(email) })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_session(&self, email: &str) -> StoreResult<()> {
        fs::write(&self.session_path, email)?;
        Ok(())
    }

    fn clear_session(&self) -> StoreResult<()> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
