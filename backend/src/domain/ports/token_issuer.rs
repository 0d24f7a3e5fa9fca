//! Port abstraction for bearer-token issuance.
use super::define_port_error;

define_port_error! {
    /// Failures raised by token issuing adapters.
    pub enum TokenIssueError {
        /// Signing or claim serialisation failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Capability set for minting signed bearer tokens.
///
/// The account service only needs "give me a token for this user"; claim
/// layout, signing algorithm, and expiry policy belong to the adapter.
pub trait TokenIssuer: Send + Sync {
    /// Mint a signed token for the given user.
    fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenIssueError>;
}
