//! Recipe composition: the association rows tying recipes to ingredients.

use chrono::{DateTime, Utc};

use crate::domain::{Error, Ingredient};

/// One composition row joined with its ingredient details.
///
/// ## Invariants
/// - At most one entry per `(recipe_id, ingredient_id)` pair.
/// - `quantity > 0` and `unit` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionEntry {
    /// The owning recipe.
    pub recipe_id: i64,
    /// The referenced ingredient, joined for display.
    pub ingredient: Ingredient,
    /// Positive culinary quantity.
    pub quantity: f64,
    /// Free-text unit; no normalisation is applied.
    pub unit: String,
    /// Optional preparation notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for adding a composition row.
///
/// # Examples
/// ```
/// use backend::domain::CompositionDraft;
///
/// let draft = CompositionDraft::new(4, 100.0, " grams ", None).unwrap();
/// assert_eq!(draft.unit(), "grams");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionDraft {
    ingredient_id: i64,
    quantity: f64,
    unit: String,
    notes: Option<String>,
}

impl CompositionDraft {
    /// Validate the raw payload against the composition invariants.
    pub fn new(
        ingredient_id: i64,
        quantity: f64,
        unit: &str,
        notes: Option<String>,
    ) -> Result<Self, Error> {
        if ingredient_id <= 0 {
            return Err(Error::invalid_input("ingredient_id must be positive"));
        }
        let (quantity, unit) = validate_measure(quantity, unit)?;
        Ok(Self {
            ingredient_id,
            quantity,
            unit,
            notes: notes
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty()),
        })
    }

    /// The referenced ingredient id.
    pub fn ingredient_id(&self) -> i64 {
        self.ingredient_id
    }

    /// Positive quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Trimmed, non-empty unit.
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    /// Optional notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Validated payload for updating an existing composition row in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionUpdate {
    quantity: f64,
    unit: String,
    notes: Option<String>,
}

impl CompositionUpdate {
    /// Validate the raw payload against the composition invariants.
    pub fn new(quantity: f64, unit: &str, notes: Option<String>) -> Result<Self, Error> {
        let (quantity, unit) = validate_measure(quantity, unit)?;
        Ok(Self {
            quantity,
            unit,
            notes: notes
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty()),
        })
    }

    /// Positive quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Trimmed, non-empty unit.
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    /// Optional notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

fn validate_measure(quantity: f64, unit: &str) -> Result<(f64, String), Error> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::invariant("quantity must be greater than zero"));
    }
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        return Err(Error::invariant("unit is required"));
    }
    Ok((quantity, trimmed.to_owned()))
}
