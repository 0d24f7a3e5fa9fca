//! Recipe categories: a shared lookup table.

use chrono::{DateTime, Utc};

/// A recipe category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Server-generated identifier.
    pub id: i64,
    /// Unique category name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
