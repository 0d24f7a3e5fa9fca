//! Recipes and their validated mutation payloads.

use chrono::{DateTime, Utc};

use crate::domain::Error;

/// A recipe owned by the user that created it.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `owner_user_id` is immutable after creation and gates every mutation of
///   the recipe and its composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Server-generated identifier.
    pub id: i64,
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional reference to a [`Category`](crate::domain::Category) row.
    pub category_id: Option<i64>,
    /// The principal that created the recipe.
    pub owner_user_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating or updating a recipe.
///
/// Category existence is checked by the service; the draft only enforces
/// shape-level rules so it stays free of I/O.
///
/// # Examples
/// ```
/// use backend::domain::RecipeDraft;
///
/// let draft = RecipeDraft::new(" Pancakes ", None, Some(3)).unwrap();
/// assert_eq!(draft.name(), "Pancakes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    description: Option<String>,
    category_id: Option<i64>,
}

impl RecipeDraft {
    /// Validate the raw payload: the name must survive trimming, and a
    /// category id, when present, must be positive.
    pub fn new(
        name: &str,
        description: Option<String>,
        category_id: Option<i64>,
    ) -> Result<Self, Error> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invariant("recipe name is required"));
        }
        if let Some(id) = category_id {
            if id <= 0 {
                return Err(Error::invariant("invalid category"));
            }
        }
        Ok(Self {
            name: trimmed.to_owned(),
            description: description
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed_description| !trimmed_description.is_empty()),
            category_id,
        })
    }

    /// Trimmed recipe name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional category reference.
    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }
}
