//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and the JSON error envelope; the domain only records the
//! failure category and a human-readable message.

use std::fmt;

/// Stable machine-readable category describing the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request body, query string, or path is malformed or incomplete.
    InvalidInput,
    /// The supplied password does not meet the minimum length.
    WeakPassword,
    /// Unified "email unknown or password wrong" failure.
    InvalidCredentials,
    /// No authenticated principal is attached to the request.
    Unauthenticated,
    /// The principal is authenticated but is not the owner.
    Forbidden,
    /// The requested entity does not exist.
    NotFound,
    /// A uniqueness or referential constraint blocks the mutation.
    Conflict,
    /// A domain invariant (quantity, unit, name, category) is violated.
    Invariant,
    /// An unexpected failure inside the domain or an adapter.
    Internal,
}

impl ErrorKind {
    /// Stable tag used in the wire envelope.
    pub fn tag(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::WeakPassword => "weak_password",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Invariant => "invariant",
            Self::Internal => "internal",
        }
    }
}

/// Domain error carrying a category and a human-readable message.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("recipe not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Create an error with an explicit kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorKind::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorKind::WeakPassword`].
    pub fn weak_password(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakPassword, message)
    }

    /// Convenience constructor for [`ErrorKind::InvalidCredentials`].
    ///
    /// The message is deliberately uniform so unknown emails and wrong
    /// passwords are indistinguishable to clients.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "invalid credentials")
    }

    /// Convenience constructor for [`ErrorKind::Unauthenticated`].
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Convenience constructor for [`ErrorKind::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::Invariant`].
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invariant, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
