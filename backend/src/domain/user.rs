//! User identity as stored by the auth schema.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// ## Invariants
/// - `email` is unique and stored lowercased.
/// - `password_hash` never leaves the service boundary; inbound DTOs omit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Server-generated identifier.
    pub id: i64,
    /// Canonical (lowercased) email address.
    pub email: String,
    /// Salted KDF output; opaque to everything but the password hasher.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
