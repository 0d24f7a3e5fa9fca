//! Diesel table definitions for the two PostgreSQL schemas.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Registered users (schema `auth`).
    auth.users (id) {
        /// Primary key.
        id -> Int8,
        /// Unique, lowercased email address.
        email -> Varchar,
        /// Salted KDF output in PHC string format.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe categories (schema `recipe_catalogue`).
    recipe_catalogue.categories (id) {
        /// Primary key.
        id -> Int8,
        /// Unique category name.
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared ingredient catalogue (schema `recipe_catalogue`).
    recipe_catalogue.ingredients (id) {
        /// Primary key.
        id -> Int8,
        /// Unique ingredient name.
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional free-text category label.
        category -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes (schema `recipe_catalogue`).
    recipe_catalogue.recipes (id) {
        /// Primary key.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional reference to `categories.id`.
        category_id -> Nullable<Int8>,
        /// The owning principal; references `auth.users.id`.
        owner_user_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe-ingredient association rows (schema `recipe_catalogue`).
    recipe_catalogue.recipe_ingredients (recipe_id, ingredient_id) {
        /// References `recipes.id`; cascades with its recipe.
        recipe_id -> Int8,
        /// References `ingredients.id`; blocks ingredient deletion.
        ingredient_id -> Int8,
        /// Positive culinary quantity.
        quantity -> Float8,
        /// Non-empty free-text unit.
        unit -> Varchar,
        /// Optional preparation notes.
        notes -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> categories (category_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(categories, ingredients, recipes, recipe_ingredients);
