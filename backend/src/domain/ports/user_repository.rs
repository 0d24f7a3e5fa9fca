//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered (unique index on `email`).
        DuplicateEmail => "email already registered",
    }
}

/// Capability set the account service needs from user storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row; the email must already be canonicalised.
    ///
    /// A concurrent insert of the same email surfaces as
    /// [`UserStoreError::DuplicateEmail`], mirroring the pre-flight check.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, UserStoreError>;

    /// Fetch a user by canonical email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError>;
}
