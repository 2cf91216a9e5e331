// Copyright 2023 Remi Bernotavicius

use derive_more::Display;
use diesel::associations::Identifiable;
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel::prelude::Insertable;
use diesel_derive_enum::DbEnum;
use diesel_derive_newtype::DieselNewType;

pub const DEFAULT_CATEGORY: &str = "Genel";

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct IngredientId(pub i32);

/// A stock item. `quantity` is expressed in `unit`, whatever that unit happens to be.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct RecipeId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub category: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct NewRecipe {
    pub name: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub category: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct RequirementId(pub i32);

/// How much of an ingredient one portion of a recipe needs.
///
/// `ingredient_name` is a copy of the ingredient's name taken when the requirement was created,
/// used to find the stock item again when `ingredient_id` no longer points at anything.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::recipe_requirements)]
pub struct RecipeRequirement {
    pub id: RequirementId,
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub required_amount: f64,
    pub unit: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::recipe_requirements)]
pub struct NewRecipeRequirement {
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub required_amount: f64,
    pub unit: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct ShoppingItemId(pub i32);

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::shopping_items)]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub name: String,
    pub quantity_needed: f64,
    pub unit: String,
    pub is_bought: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::shopping_items)]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity_needed: f64,
    pub unit: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct UsageLogId(pub i32);

#[derive(Debug, Display, Hash, Copy, Clone, PartialEq, Eq, DbEnum)]
pub enum UsageKind {
    #[display("recipe")]
    Recipe,
    #[display("ingredient")]
    Ingredient,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::usage_logs)]
pub struct UsageLog {
    pub id: UsageLogId,
    pub item_name: String,
    pub item_type: UsageKind,
    pub amount: f64,
    pub unit: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::usage_logs)]
pub struct NewUsageLog {
    pub item_name: String,
    pub item_type: UsageKind,
    pub amount: f64,
    pub unit: String,
    pub created_at: chrono::NaiveDateTime,
}
