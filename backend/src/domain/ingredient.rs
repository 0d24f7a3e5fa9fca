//! Ingredients: shared catalogue entries any authenticated user may curate.

use chrono::{DateTime, Utc};

use crate::domain::Error;

/// A catalogue ingredient.
///
/// The free-text `category` label is unrelated to recipe [`Category`] rows;
/// it is a loose grouping such as "dairy" or "spice".
///
/// [`Category`]: crate::domain::Category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Server-generated identifier.
    pub id: i64,
    /// Unique, trimmed name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional free-text category label.
    pub category: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating or updating an ingredient.
///
/// # Examples
/// ```
/// use backend::domain::IngredientDraft;
///
/// let draft = IngredientDraft::new("  Flour ", None, Some("baking".into())).unwrap();
/// assert_eq!(draft.name(), "Flour");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    name: String,
    description: Option<String>,
    category: Option<String>,
}

impl IngredientDraft {
    /// Validate the raw payload. The name must be non-empty after trimming;
    /// blank description or category collapse to absent.
    pub fn new(
        name: &str,
        description: Option<String>,
        category: Option<String>,
    ) -> Result<Self, Error> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invariant("ingredient name is required"));
        }
        Ok(Self {
            name: trimmed.to_owned(),
            description: normalize_optional(description),
            category: normalize_optional(category),
        })
    }

    /// Trimmed ingredient name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional free-text category label.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Filter for the public ingredient listing.
///
/// `search` and `category` are mutually exclusive; when both survive
/// normalisation, `search` wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IngredientFilter {
    /// No filtering; list everything.
    #[default]
    All,
    /// Case-insensitive substring match on the name.
    NameContains(String),
    /// Exact match on the free-text category label.
    CategoryEquals(String),
}

impl IngredientFilter {
    /// Build a filter from the raw query parameters, applying the
    /// precedence and empty-after-trim rules.
    pub fn from_query(search: Option<&str>, category: Option<&str>) -> Self {
        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            return Self::NameContains(term.to_owned());
        }
        if let Some(label) = category.map(str::trim).filter(|label| !label.is_empty()) {
            return Self::CategoryEquals(label.to_owned());
        }
        Self::All
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
