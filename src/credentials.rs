//! Salted password hashing.
//!
//! Stored format is `iterations:salt:hash` with base64 salt and hash, so a
//! stored value carries everything needed to verify it and the iteration
//! count can be raised later without breaking old records.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;
const ITERATIONS: u32 = 65_536;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = stretch(password.as_bytes(), &salt, ITERATIONS);
    format!(
        "{}:{}:{}",
        ITERATIONS,
        BASE64.encode(salt),
        BASE64.encode(digest)
    )
}

/// Verify a password against a stored hash.
///
/// Returns false for wrong passwords and for any malformed stored value;
/// login must never panic on a corrupted record.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, ':');
    let (Some(iters), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iters) = iters.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt), BASE64.decode(expected)) else {
        return false;
    };

    let actual = stretch(password.as_bytes(), &salt, iters);
    constant_time_eq(&expected, &actual)
}

/// Iterated salted SHA-256 digest.
fn stretch(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password);
    let mut digest: [u8; 32] = hasher.finalize().into();
    for _ in 1..iterations {
        digest = Sha256::digest(digest).into();
    }
    digest
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
