//! Actix middleware shared by both service binaries.

pub mod gateway;
pub mod trace;

pub use gateway::{ExtractUserFromGatewayHeaders, GatewayUser};
pub use trace::Trace;
