//! The authenticated principal attached to gateway-mediated requests.

use std::fmt;

/// Identity of the authenticated user for the current request.
///
/// Populated by the gateway-header middleware; handlers obtain it through a
/// typed extractor and never parse authentication material themselves.
///
/// # Examples
/// ```
/// use backend::domain::Principal;
///
/// let principal = Principal::new(7, "cook@example.com");
/// assert_eq!(principal.user_id(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: i64,
    email: String,
}

impl Principal {
    /// Construct a principal from a verified user id and email.
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// The authenticated user's id.
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// The authenticated user's email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.user_id, self.email)
    }
}
