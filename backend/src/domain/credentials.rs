//! Credential payload validation for registration and login.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that normalise and validate string inputs before a handler talks to a
//! service. Emails are case-folded here so every comparison and write sees
//! the canonical form.

use zeroize::Zeroizing;

use crate::domain::Error;

/// Minimum password length in UTF-8 code units.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validated credentials used by registration and login.
///
/// ## Invariants
/// - `email` is trimmed, lowercased, and non-empty.
/// - `password` is non-empty; registration additionally requires
///   [`MIN_PASSWORD_LEN`] UTF-8 code units.
///
/// # Examples
/// ```
/// use backend::domain::Credentials;
///
/// let creds = Credentials::for_login("  Cook@Example.COM ", "secret").unwrap();
/// assert_eq!(creds.email(), "cook@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Validate credentials for registration: enforces the password policy.
    pub fn for_registration(email: &str, password: &str) -> Result<Self, Error> {
        let credentials = Self::for_login(email, password)?;
        if credentials.password().len() < MIN_PASSWORD_LEN {
            return Err(Error::weak_password(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(credentials)
    }

    /// Validate credentials for login: both fields must be present.
    pub fn for_login(email: &str, password: &str) -> Result<Self, Error> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(Error::invalid_input("email is required"));
        }
        if password.is_empty() {
            return Err(Error::invalid_input("password is required"));
        }
        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Canonical (trimmed, lowercased) email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
