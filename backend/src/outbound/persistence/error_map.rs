//! Shared error mapping for the Diesel adapters.

use tracing::debug;

use super::pool::PoolError;

/// Flatten a pool failure into the message a `Connection` variant carries.
pub(super) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => message,
    }
}

/// Describe a Diesel failure for a `Query` variant, logging the detail that
/// must not cross the wire.
pub(super) fn diesel_error_message(error: &diesel::result::Error, context: &str) -> String {
    if let diesel::result::Error::DatabaseError(kind, info) = error {
        debug!(?kind, message = info.message(), context, "diesel operation failed");
    } else {
        debug!(%error, context, "diesel operation failed");
    }
    format!("{context} failed")
}

/// True when the failure is a unique-constraint violation.
pub(super) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    )
}

/// True when the failure is a foreign-key violation.
pub(super) fn is_foreign_key_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _
        )
    )
}
