//! Argon2id password-hashing adapter.
//!
//! The KDF is intentionally CPU-heavy; both operations run on the blocking
//! pool so hashing cannot starve the reactor. The PHC string embeds salt and
//! parameters, so verification is self-describing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Production [`PasswordHasher`] backed by Argon2id with default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            // A malformed stored hash reads as "wrong password" so login keeps
            // its uniform failure surface.
            let Ok(parsed) = PasswordHash::new(&hash) else {
                return Ok(false);
            };
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("securepassword123").await.expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher
            .verify("securepassword123", &hash)
            .await
            .expect("verify"));
        assert!(!hasher.verify("wrongpassword", &hash).await.expect("verify"));
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("securepassword123").await.expect("hash");
        let second = hasher.hash("securepassword123").await.expect("hash");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_stored_hash_reads_as_mismatch() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher
            .verify("whatever", "not-a-phc-string")
            .await
            .expect("verify"));
    }
}
