//! Meal-prep back-end library.
//!
//! Two binaries share this crate: `auth-service` (credential lifecycle and
//! token issuance) and `recipe-service` (recipes, ingredients, composition,
//! and grocery aggregation). The layout is hexagonal: [`domain`] holds
//! entities, invariants, and use-case services behind ports; [`inbound`] and
//! [`outbound`] adapt HTTP and PostgreSQL to those ports; [`token`] is the
//! shared HS256 bearer-token kernel; [`server`] wires it all together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod token;

pub use middleware::{ExtractUserFromGatewayHeaders, Trace};
