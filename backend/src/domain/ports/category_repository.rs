//! Port abstraction for category lookup adapters.
use async_trait::async_trait;

use crate::domain::Category;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

/// Capability set for the shared category lookup table.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every category.
    async fn list(&self) -> Result<Vec<Category>, CategoryStoreError>;

    /// Fetch one category by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, CategoryStoreError>;
}
