//! Regression coverage for the recipe service and its ownership gate.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::IngredientRepository;
use crate::domain::{ErrorKind, IngredientDraft};
use crate::outbound::memory::InMemoryCatalogue;

struct Fixture {
    service: RecipeService,
    catalogue: Arc<InMemoryCatalogue>,
}

fn fixture() -> Fixture {
    let catalogue = Arc::new(InMemoryCatalogue::new());
    let service = RecipeService::new(catalogue.clone(), catalogue.clone(), catalogue.clone());
    Fixture { service, catalogue }
}

fn owner() -> Principal {
    Principal::new(1, "owner@example.com")
}

fn intruder() -> Principal {
    Principal::new(2, "intruder@example.com")
}

fn recipe_draft(name: &str) -> RecipeDraft {
    RecipeDraft::new(name, None, None).expect("valid draft")
}

async fn seed_ingredient(fixture: &Fixture, name: &str) -> i64 {
    IngredientRepository::insert(
        fixture.catalogue.as_ref(),
        &IngredientDraft::new(name, None, None).expect("valid draft"),
    )
    .await
    .expect("ingredient insert")
    .id
}

fn entry_draft(ingredient_id: i64, quantity: f64, unit: &str) -> CompositionDraft {
    CompositionDraft::new(ingredient_id, quantity, unit, None).expect("valid draft")
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let fx = fixture();

    let created = fx
        .service
        .create(&owner(), &recipe_draft("  Pancakes "))
        .await
        .expect("create succeeds");
    assert_eq!(created.name, "Pancakes");
    assert_eq!(created.owner_user_id, 1);

    let view = fx.service.get(created.id, false).await.expect("get");
    assert_eq!(view.recipe, created);
    assert!(view.composition.is_none());
}

#[tokio::test]
async fn create_rejects_missing_category() {
    let fx = fixture();

    let draft = RecipeDraft::new("Stew", None, Some(42)).expect("valid shape");
    let err = fx
        .service
        .create(&owner(), &draft)
        .await
        .expect_err("category missing");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.message().contains("category"));
}

#[tokio::test]
async fn update_reports_missing_before_forbidden() {
    let fx = fixture();

    let err = fx
        .service
        .update(&intruder(), 99, &recipe_draft("Hijack"))
        .await
        .expect_err("no such recipe");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let fx = fixture();
    let created = fx
        .service
        .create(&owner(), &recipe_draft("Pancakes"))
        .await
        .expect("create");

    let err = fx
        .service
        .update(&intruder(), created.id, &recipe_draft("Hijack"))
        .await
        .expect_err("not the owner");
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    // The recipe is untouched.
    let view = fx.service.get(created.id, false).await.expect("get");
    assert_eq!(view.recipe.name, "Pancakes");
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let fx = fixture();
    let created = fx
        .service
        .create(&owner(), &recipe_draft("Pancakes"))
        .await
        .expect("create");

    let err = fx
        .service
        .delete(&intruder(), created.id)
        .await
        .expect_err("not the owner");
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    fx.service
        .delete(&owner(), created.id)
        .await
        .expect("owner may delete");
    let err = fx.service.get(created.id, false).await.expect_err("gone");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn add_entry_rejects_duplicate_pair() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");
    let tomato = seed_ingredient(&fx, "Tomato").await;

    fx.service
        .add_entry(&owner(), recipe.id, &entry_draft(tomato, 2.0, "pieces"))
        .await
        .expect("first add");
    let err = fx
        .service
        .add_entry(&owner(), recipe.id, &entry_draft(tomato, 3.0, "pieces"))
        .await
        .expect_err("same pair again");
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn add_entry_rejects_unknown_ingredient() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");

    let err = fx
        .service
        .add_entry(&owner(), recipe.id, &entry_draft(404, 2.0, "pieces"))
        .await
        .expect_err("unknown ingredient");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn composition_requires_existing_recipe() {
    let fx = fixture();
    let err = fx.service.composition(7).await.expect_err("no recipe");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn set_composition_replaces_existing_rows() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");
    let tomato = seed_ingredient(&fx, "Tomato").await;
    let salt = seed_ingredient(&fx, "Salt").await;

    fx.service
        .add_entry(&owner(), recipe.id, &entry_draft(tomato, 2.0, "pieces"))
        .await
        .expect("seed row");

    let replaced = fx
        .service
        .set_composition(
            &owner(),
            recipe.id,
            &[entry_draft(salt, 5.0, "grams"), entry_draft(tomato, 4.0, "pieces")],
        )
        .await
        .expect("replace");

    assert_eq!(replaced.len(), 2);
    let tomato_entry = replaced
        .iter()
        .find(|entry| entry.ingredient.id == tomato)
        .expect("tomato entry");
    assert_eq!(tomato_entry.quantity, 4.0);
}

#[tokio::test]
async fn set_composition_rejects_repeated_ingredient() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");
    let tomato = seed_ingredient(&fx, "Tomato").await;

    let err = fx
        .service
        .set_composition(
            &owner(),
            recipe.id,
            &[entry_draft(tomato, 1.0, "pieces"), entry_draft(tomato, 2.0, "pieces")],
        )
        .await
        .expect_err("repeated ingredient");
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn update_entry_reports_missing_pair() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");
    let tomato = seed_ingredient(&fx, "Tomato").await;

    let update = CompositionUpdate::new(1.0, "pieces", None).expect("valid update");
    let err = fx
        .service
        .update_entry(&owner(), recipe.id, tomato, &update)
        .await
        .expect_err("no such row");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn remove_entry_round_trips() {
    let fx = fixture();
    let recipe = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create");
    let tomato = seed_ingredient(&fx, "Tomato").await;
    fx.service
        .add_entry(&owner(), recipe.id, &entry_draft(tomato, 2.0, "pieces"))
        .await
        .expect("add");

    fx.service
        .remove_entry(&owner(), recipe.id, tomato)
        .await
        .expect("remove");
    let entries = fx.service.composition(recipe.id).await.expect("composition");
    assert!(entries.is_empty());
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn containing_all_requires_every_ingredient(#[case] include_composition: bool) {
    let fx = fixture();
    let tomato = seed_ingredient(&fx, "Tomato").await;
    let salt = seed_ingredient(&fx, "Salt").await;

    let soup = fx
        .service
        .create(&owner(), &recipe_draft("Soup"))
        .await
        .expect("create soup");
    let salad = fx
        .service
        .create(&owner(), &recipe_draft("Salad"))
        .await
        .expect("create salad");

    fx.service
        .add_entry(&owner(), soup.id, &entry_draft(tomato, 2.0, "pieces"))
        .await
        .expect("soup tomato");
    fx.service
        .add_entry(&owner(), soup.id, &entry_draft(salt, 1.0, "tsp"))
        .await
        .expect("soup salt");
    fx.service
        .add_entry(&owner(), salad.id, &entry_draft(tomato, 1.0, "pieces"))
        .await
        .expect("salad tomato");

    let views = fx
        .service
        .containing_all(&[tomato, salt], include_composition)
        .await
        .expect("search");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].recipe.id, soup.id);
    assert_eq!(views[0].composition.is_some(), include_composition);
}

#[tokio::test]
async fn by_category_requires_existing_category() {
    let fx = fixture();
    let err = fx.service.by_category(9).await.expect_err("no category");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let category = fx.catalogue.seed_category("Breakfast", None);
    let draft = RecipeDraft::new("Pancakes", None, Some(category.id)).expect("valid draft");
    let created = fx.service.create(&owner(), &draft).await.expect("create");

    let recipes = fx.service.by_category(category.id).await.expect("list");
    assert_eq!(recipes, vec![created]);
}

#[tokio::test]
async fn categories_lists_seeded_rows() {
    let fx = fixture();
    assert!(fx.service.categories().await.expect("list").is_empty());

    fx.catalogue.seed_category("Breakfast", Some("morning dishes"));
    fx.catalogue.seed_category("Dinner", None);

    let categories = fx.service.categories().await.expect("list");
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Breakfast");
}
