//! Credential lifecycle: registration, login, and principal introspection.

use std::sync::Arc;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, TokenIssueError, TokenIssuer, UserRepository, UserStoreError,
};
use crate::domain::{Credentials, Error, Principal, User};

/// A freshly authenticated user together with their bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user row.
    pub user: User,
}

/// Domain service implementing the credential lifecycle.
///
/// Repositories, the KDF, and the token issuer are injected as capability
/// sets so tests run against in-memory substitutes.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Assemble the service from its collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new user and issue their first token.
    ///
    /// The pre-flight existence check and the unique index race to the same
    /// outcome: a duplicate email is always reported as a conflict.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthenticatedUser, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store_error)?;
        if existing.is_some() {
            return Err(user_exists());
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;

        let user = match self.users.insert(credentials.email(), &password_hash).await {
            Ok(user) => user,
            Err(UserStoreError::DuplicateEmail) => return Err(user_exists()),
            Err(err) => return Err(map_user_store_error(err)),
        };

        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(map_token_error)?;
        Ok(AuthenticatedUser { token, user })
    }

    /// Authenticate existing credentials and issue a fresh token.
    ///
    /// Unknown emails and wrong passwords produce the same error so clients
    /// cannot enumerate accounts.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store_error)?
        else {
            return Err(Error::invalid_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !verified {
            return Err(Error::invalid_credentials());
        }

        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(map_token_error)?;
        Ok(AuthenticatedUser { token, user })
    }

    /// Resolve the user row behind a gateway-injected principal.
    pub async fn current_user(&self, principal: &Principal) -> Result<User, Error> {
        self.users
            .find_by_id(principal.user_id())
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

fn user_exists() -> Error {
    Error::conflict("user already exists")
}

fn map_user_store_error(err: UserStoreError) -> Error {
    Error::internal(err.to_string())
}

fn map_hash_error(err: PasswordHashError) -> Error {
    Error::internal(err.to_string())
}

fn map_token_error(err: TokenIssueError) -> Error {
    Error::internal(err.to_string())
}
