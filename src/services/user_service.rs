//! User service: registration, login, session handling.

use crate::credentials;
use crate::error::ServiceResult;
use crate::models::User;
use crate::repositories::UserRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Parameters for registering a new user.
#[derive(Debug, Clone, Default)]
pub struct RegisterParams {
    pub full_name: String,
    pub id_type: String,
    pub id_number: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Account operations over the user repository.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create the service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user and start a session for them.
    ///
    /// The email is lowercased so login is case-insensitive; the password
    /// is only ever stored as a salted hash.
    pub fn register(&self, params: RegisterParams) -> ServiceResult<User> {
        let user = User {
            full_name: params.full_name,
            id_type: params.id_type,
            id_number: params.id_number,
            email: params.email.trim().to_lowercase(),
            phone: params.phone,
            password_hash: credentials::hash_password(&params.password),
            registered_at: Utc::now(),
            last_location: None,
        };
        self.users.register(user.clone())?;
        self.users.save_session(&user.email)?;
        info!("Registered {}", user.email);
        Ok(user)
    }

    /// Verify credentials; on success start a session and return the user.
    ///
    /// Returns `Ok(None)` for unknown emails and wrong passwords alike.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email)? else {
            return Ok(None);
        };
        if !credentials::verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        self.users.save_session(&email)?;
        info!("Logged in {}", email);
        Ok(Some(user))
    }

    /// The user of the saved session, if one exists and still resolves.
    pub fn current_user(&self) -> ServiceResult<Option<User>> {
        let Some(email) = self.users.current_session()? else {
            return Ok(None);
        };
        Ok(self.users.find_by_email(&email)?)
    }

    /// End the current session.
    pub fn logout(&self) -> ServiceResult<()> {
        self.users.clear_session()?;
        Ok(())
    }
}
