//! Integration tests for registration, login, and session handling.

mod mocks;

use mocks::MockUserRepository;
use sos_beacon::{RegisterParams, StoreError, UserService};
use std::sync::Arc;

fn params(email: &str) -> RegisterParams {
    RegisterParams {
        full_name: "Asha Rao".into(),
        id_type: "Passport".into(),
        id_number: "P1234567".into(),
        email: email.into(),
        phone: "919876543210".into(),
        password: "hunter2".into(),
    }
}

#[test]
fn register_hashes_password_and_starts_session() {
    let service = UserService::new(Arc::new(MockUserRepository::new()));

    let user = service.register(params("Asha@Example.com")).unwrap();
    assert_eq!(user.email, "asha@example.com");
    assert_ne!(user.password_hash, "hunter2");
    assert!(user.password_hash.starts_with("65536:"));

    let current = service.current_user().unwrap().unwrap();
    assert_eq!(current.email, "asha@example.com");
}

#[test]
fn duplicate_registration_is_rejected() {
    let service = UserService::new(Arc::new(MockUserRepository::new()));
    service.register(params("asha@example.com")).unwrap();

    let result = service.register(params("asha@example.com"));
    assert!(matches!(
        result,
        Err(sos_beacon::ServiceError::Store(StoreError::Duplicate(_)))
    ));
}

#[test]
fn login_accepts_correct_password_only() {
    let service = UserService::new(Arc::new(MockUserRepository::new()));
    service.register(params("asha@example.com")).unwrap();
    service.logout().unwrap();

    assert!(service.login("asha@example.com", "wrong").unwrap().is_none());
    assert!(service.current_user().unwrap().is_none());

    let user = service.login("ASHA@example.com", "hunter2").unwrap();
    assert!(user.is_some());
    assert!(service.current_user().unwrap().is_some());
}

#[test]
fn login_unknown_email_is_none_not_error() {
    let service = UserService::new(Arc::new(MockUserRepository::new()));
    assert!(service.login("ghost@example.com", "pw").unwrap().is_none());
}

#[test]
fn logout_clears_the_session() {
    let service = UserService::new(Arc::new(MockUserRepository::new()));
    service.register(params("asha@example.com")).unwrap();

    service.logout().unwrap();
    assert!(service.current_user().unwrap().is_none());
}
