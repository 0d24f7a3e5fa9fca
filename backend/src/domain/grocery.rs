//! Grocery aggregation across an arbitrary set of recipes.
//!
//! The aggregator is pure: services fetch each recipe's composition and feed
//! the contributions here, so the unit-conflict semantics are testable
//! without any storage.

use std::collections::BTreeMap;

/// One composition row contributing to the aggregate, tagged with the name
/// of the recipe it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryContribution {
    /// Name of the contributing recipe.
    pub recipe_name: String,
    /// The referenced ingredient's id.
    pub ingredient_id: i64,
    /// The referenced ingredient's display name.
    pub ingredient_name: String,
    /// Quantity from the composition row.
    pub quantity: f64,
    /// Free-text unit from the composition row.
    pub unit: String,
}

/// Running total for one aggregated ingredient.
///
/// Once two contributions disagree on the unit the total degrades to
/// [`GroceryTotal::UnitConflict`] and stays there; later matching units do
/// not resurrect the sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroceryTotal {
    /// All contributions so far share one unit; the sum is meaningful.
    Sum(f64),
    /// Units disagree; manual reconciliation is required.
    UnitConflict,
}

impl GroceryTotal {
    /// Wire representation: the summed quantity, or `-1` as the conflict
    /// sentinel existing clients expect.
    pub fn as_wire_quantity(self) -> f64 {
        match self {
            Self::Sum(total) => total,
            Self::UnitConflict => -1.0,
        }
    }
}

/// One aggregated grocery item.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    /// The aggregated ingredient's id.
    pub ingredient_id: i64,
    /// The aggregated ingredient's display name.
    pub ingredient_name: String,
    /// Accumulated quantity or the conflict marker.
    pub total: GroceryTotal,
    /// Unit of the first contribution; retained even under conflict.
    pub unit: String,
    /// Names of every contributing recipe, in contribution order.
    pub recipes: Vec<String>,
}

/// Fold contributions into per-ingredient grocery items.
///
/// An empty input yields an empty list. Output order follows ingredient id;
/// callers treat it as arbitrary.
///
/// # Examples
/// ```
/// use backend::domain::grocery::{aggregate, GroceryContribution, GroceryTotal};
///
/// let items = aggregate(vec![GroceryContribution {
///     recipe_name: "Pancakes".into(),
///     ingredient_id: 1,
///     ingredient_name: "Flour".into(),
///     quantity: 100.0,
///     unit: "grams".into(),
/// }]);
/// assert_eq!(items[0].total, GroceryTotal::Sum(100.0));
/// ```
pub fn aggregate(contributions: impl IntoIterator<Item = GroceryContribution>) -> Vec<GroceryItem> {
    let mut items: BTreeMap<i64, GroceryItem> = BTreeMap::new();

    for contribution in contributions {
        match items.get_mut(&contribution.ingredient_id) {
            None => {
                items.insert(
                    contribution.ingredient_id,
                    GroceryItem {
                        ingredient_id: contribution.ingredient_id,
                        ingredient_name: contribution.ingredient_name,
                        total: GroceryTotal::Sum(contribution.quantity),
                        unit: contribution.unit,
                        recipes: vec![contribution.recipe_name],
                    },
                );
            }
            Some(item) => {
                item.recipes.push(contribution.recipe_name);
                item.total = match item.total {
                    GroceryTotal::Sum(total) if contribution.unit == item.unit => {
                        GroceryTotal::Sum(total + contribution.quantity)
                    }
                    GroceryTotal::Sum(_) => GroceryTotal::UnitConflict,
                    GroceryTotal::UnitConflict => GroceryTotal::UnitConflict,
                };
            }
        }
    }

    items.into_values().collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn contribution(
        recipe: &str,
        ingredient_id: i64,
        ingredient: &str,
        quantity: f64,
        unit: &str,
    ) -> GroceryContribution {
        GroceryContribution {
            recipe_name: recipe.to_owned(),
            ingredient_id,
            ingredient_name: ingredient.to_owned(),
            quantity,
            unit: unit.to_owned(),
        }
    }

    #[rstest]
    fn empty_input_yields_empty_list() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[rstest]
    fn matching_units_sum() {
        let items = aggregate(vec![
            contribution("A", 1, "Tomato", 100.0, "grams"),
            contribution("B", 1, "Tomato", 50.0, "grams"),
        ]);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.total, GroceryTotal::Sum(150.0));
        assert_eq!(item.unit, "grams");
        assert_eq!(item.recipes, vec!["A".to_owned(), "B".to_owned()]);
    }

    #[rstest]
    fn conflicting_units_set_the_sentinel() {
        let items = aggregate(vec![
            contribution("A", 1, "Tomato", 100.0, "grams"),
            contribution("B", 1, "Tomato", 1.0, "cup"),
        ]);

        let item = &items[0];
        assert_eq!(item.total, GroceryTotal::UnitConflict);
        assert_eq!(item.total.as_wire_quantity(), -1.0);
        // The first unit is retained for display.
        assert_eq!(item.unit, "grams");
        assert_eq!(item.recipes, vec!["A".to_owned(), "B".to_owned()]);
    }

    #[rstest]
    fn conflict_is_sticky_despite_later_matches() {
        let items = aggregate(vec![
            contribution("A", 1, "Tomato", 100.0, "grams"),
            contribution("B", 1, "Tomato", 1.0, "cup"),
            contribution("C", 1, "Tomato", 25.0, "grams"),
        ]);

        assert_eq!(items[0].total, GroceryTotal::UnitConflict);
        assert_eq!(items[0].recipes.len(), 3);
    }

    #[rstest]
    fn distinct_ingredients_stay_separate() {
        let items = aggregate(vec![
            contribution("A", 2, "Salt", 5.0, "grams"),
            contribution("A", 1, "Tomato", 100.0, "grams"),
        ]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ingredient_id, 1);
        assert_eq!(items[1].ingredient_id, 2);
    }

    #[rstest]
    fn totals_are_permutation_invariant() {
        let forward = vec![
            contribution("A", 1, "Tomato", 100.0, "grams"),
            contribution("B", 1, "Tomato", 50.0, "grams"),
            contribution("B", 2, "Salt", 5.0, "grams"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let lhs = aggregate(forward);
        let rhs = aggregate(reversed);

        assert_eq!(lhs.len(), rhs.len());
        for (left, right) in lhs.iter().zip(rhs.iter()) {
            assert_eq!(left.ingredient_id, right.ingredient_id);
            assert_eq!(left.total, right.total);
        }
    }
}
