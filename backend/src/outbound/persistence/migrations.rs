//! Embedded schema migrations, run by both binaries before binding.

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// All SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Failures applying the embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("migration connection failed: {message}")]
    Connection {
        /// Driver-provided detail.
        message: String,
    },
    /// A migration failed to apply.
    #[error("migrations failed to apply: {message}")]
    Apply {
        /// Harness-provided detail.
        message: String,
    },
}

/// Apply every pending migration against `database_url`.
///
/// The migration harness is synchronous, so the work runs on the blocking
/// pool over a dedicated connection rather than through the async pool.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<(), MigrationError> {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|err| MigrationError::Connection {
                message: err.to_string(),
            })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })?;
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Apply {
        message: err.to_string(),
    })?
}
