//! Port abstraction for the password key-derivation function.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The KDF itself failed (parameter or encoding problem).
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Capability set for hashing and verifying passwords.
///
/// Hashing is intentionally CPU-heavy; adapters must keep it off the async
/// reactor (the Argon2 adapter runs on the blocking pool).
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash for storage.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a candidate password against a stored hash.
    ///
    /// Malformed stored hashes report `false` rather than erroring so login
    /// keeps its uniform failure surface.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
