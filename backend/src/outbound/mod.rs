//! Outbound adapters implementing the domain ports.

pub mod crypto;
pub mod memory;
pub mod persistence;
