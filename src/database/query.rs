// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{
    Ingredient, IngredientId, NewIngredient, NewRecipe, NewRecipeRequirement, NewShoppingItem,
    NewUsageLog, Recipe, RecipeId, RecipeRequirement, RequirementId, ShoppingItem,
    ShoppingItemId, UsageLog,
};
use diesel::prelude::Connection as _;
use diesel::ExpressionMethods as _;
use diesel::OptionalExtension as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

fn last_insert_rowid(conn: &mut database::Connection) -> QueryResult<i32> {
    use diesel::dsl::sql;
    use diesel::sql_types::Integer;

    diesel::select(sql::<Integer>("last_insert_rowid()")).get_result(conn)
}

pub fn list_ingredients(conn: &mut database::Connection) -> QueryResult<Vec<Ingredient>> {
    use database::schema::ingredients::dsl::*;

    ingredients
        .select(Ingredient::as_select())
        .order_by((name.asc(), id.asc()))
        .load(conn)
}

pub fn search_ingredients(
    conn: &mut database::Connection,
    query: &str,
) -> QueryResult<Vec<Ingredient>> {
    use database::schema::ingredients::dsl::*;
    use diesel::expression_methods::TextExpressionMethods as _;

    ingredients
        .select(Ingredient::as_select())
        .filter(name.like(format!("%{query}%")))
        .order_by((name.asc(), id.asc()))
        .load(conn)
}

pub fn find_ingredient_by_id(
    conn: &mut database::Connection,
    find_id: IngredientId,
) -> QueryResult<Option<Ingredient>> {
    use database::schema::ingredients::dsl::*;

    ingredients
        .select(Ingredient::as_select())
        .filter(id.eq(find_id))
        .get_result(conn)
        .optional()
}

/// Exact, case-sensitive match. When several rows share the name the oldest wins.
pub fn find_ingredient_by_name(
    conn: &mut database::Connection,
    find_name: &str,
) -> QueryResult<Option<Ingredient>> {
    use database::schema::ingredients::dsl::*;

    ingredients
        .select(Ingredient::as_select())
        .filter(name.eq(find_name))
        .order_by(id.asc())
        .first(conn)
        .optional()
}

pub fn insert_ingredient(
    conn: &mut database::Connection,
    new_ingredient: &NewIngredient,
) -> QueryResult<IngredientId> {
    use database::schema::ingredients::dsl::*;
    use diesel::insert_into;

    conn.transaction(|conn| {
        insert_into(ingredients).values(new_ingredient).execute(conn)?;
        last_insert_rowid(conn).map(IngredientId)
    })
}

pub fn update_ingredient(conn: &mut database::Connection, edit: &Ingredient) -> QueryResult<()> {
    use database::schema::ingredients::dsl::*;
    use diesel::update;

    update(ingredients)
        .filter(id.eq(edit.id))
        .set((
            name.eq(&edit.name),
            quantity.eq(edit.quantity),
            unit.eq(&edit.unit),
            category.eq(&edit.category),
        ))
        .execute(conn)?;
    Ok(())
}

pub fn update_ingredient_quantity(
    conn: &mut database::Connection,
    edit_id: IngredientId,
    new_quantity: f64,
) -> QueryResult<()> {
    use database::schema::ingredients::dsl::*;
    use diesel::update;

    update(ingredients)
        .filter(id.eq(edit_id))
        .set(quantity.eq(new_quantity))
        .execute(conn)?;
    Ok(())
}

pub fn delete_ingredient(
    conn: &mut database::Connection,
    delete_id: IngredientId,
) -> QueryResult<bool> {
    use database::schema::ingredients::dsl::*;
    use diesel::delete;

    let deleted = delete(ingredients.filter(id.eq(delete_id))).execute(conn)?;
    Ok(deleted > 0)
}

pub fn list_recipes(conn: &mut database::Connection) -> QueryResult<Vec<Recipe>> {
    use database::schema::recipes::dsl::*;

    recipes
        .select(Recipe::as_select())
        .order_by((name.asc(), id.asc()))
        .load(conn)
}

pub fn find_recipe_by_id(
    conn: &mut database::Connection,
    find_id: RecipeId,
) -> QueryResult<Option<Recipe>> {
    use database::schema::recipes::dsl::*;

    recipes
        .select(Recipe::as_select())
        .filter(id.eq(find_id))
        .get_result(conn)
        .optional()
}

pub fn insert_recipe(
    conn: &mut database::Connection,
    new_recipe: &NewRecipe,
) -> QueryResult<RecipeId> {
    use database::schema::recipes::dsl::*;
    use diesel::insert_into;

    conn.transaction(|conn| {
        insert_into(recipes).values(new_recipe).execute(conn)?;
        last_insert_rowid(conn).map(RecipeId)
    })
}

pub fn update_recipe(conn: &mut database::Connection, edit: &Recipe) -> QueryResult<()> {
    use database::schema::recipes::dsl::*;
    use diesel::update;

    update(recipes)
        .filter(id.eq(edit.id))
        .set((
            name.eq(&edit.name),
            instructions.eq(&edit.instructions),
            image_url.eq(&edit.image_url),
            category.eq(&edit.category),
        ))
        .execute(conn)?;
    Ok(())
}

/// Deletes the recipe together with its requirements.
pub fn delete_recipe(conn: &mut database::Connection, delete_id: RecipeId) -> QueryResult<bool> {
    use diesel::delete;

    conn.transaction(|conn| {
        {
            use database::schema::recipe_requirements::dsl::*;
            delete(recipe_requirements.filter(recipe_id.eq(delete_id))).execute(conn)?;
        }

        let deleted = {
            use database::schema::recipes::dsl::*;
            delete(recipes.filter(id.eq(delete_id))).execute(conn)?
        };
        Ok(deleted > 0)
    })
}

pub fn list_requirements(
    conn: &mut database::Connection,
    for_recipe: RecipeId,
) -> QueryResult<Vec<RecipeRequirement>> {
    use database::schema::recipe_requirements::dsl::*;

    recipe_requirements
        .select(RecipeRequirement::as_select())
        .filter(recipe_id.eq(for_recipe))
        .order_by(id.asc())
        .load(conn)
}

pub fn insert_requirement(
    conn: &mut database::Connection,
    new_requirement: &NewRecipeRequirement,
) -> QueryResult<RequirementId> {
    use database::schema::recipe_requirements::dsl::*;
    use diesel::insert_into;

    conn.transaction(|conn| {
        insert_into(recipe_requirements)
            .values(new_requirement)
            .execute(conn)?;
        last_insert_rowid(conn).map(RequirementId)
    })
}

pub fn update_requirement(
    conn: &mut database::Connection,
    edit_id: RequirementId,
    new_amount: f64,
    new_unit: &str,
) -> QueryResult<bool> {
    use database::schema::recipe_requirements::dsl::*;
    use diesel::update;

    let updated = update(recipe_requirements)
        .filter(id.eq(edit_id))
        .set((required_amount.eq(new_amount), unit.eq(new_unit)))
        .execute(conn)?;
    Ok(updated > 0)
}

pub fn delete_requirement(
    conn: &mut database::Connection,
    delete_id: RequirementId,
) -> QueryResult<bool> {
    use database::schema::recipe_requirements::dsl::*;
    use diesel::delete;

    let deleted = delete(recipe_requirements.filter(id.eq(delete_id))).execute(conn)?;
    Ok(deleted > 0)
}

pub fn list_shopping_items(conn: &mut database::Connection) -> QueryResult<Vec<ShoppingItem>> {
    use database::schema::shopping_items::dsl::*;

    shopping_items
        .select(ShoppingItem::as_select())
        .order_by((name.asc(), id.asc()))
        .load(conn)
}

pub fn find_shopping_item_by_id(
    conn: &mut database::Connection,
    find_id: ShoppingItemId,
) -> QueryResult<Option<ShoppingItem>> {
    use database::schema::shopping_items::dsl::*;

    shopping_items
        .select(ShoppingItem::as_select())
        .filter(id.eq(find_id))
        .get_result(conn)
        .optional()
}

pub fn insert_shopping_item(
    conn: &mut database::Connection,
    new_item: &NewShoppingItem,
) -> QueryResult<ShoppingItemId> {
    use database::schema::shopping_items::dsl::*;
    use diesel::insert_into;

    conn.transaction(|conn| {
        insert_into(shopping_items).values(new_item).execute(conn)?;
        last_insert_rowid(conn).map(ShoppingItemId)
    })
}

pub fn delete_shopping_item(
    conn: &mut database::Connection,
    delete_id: ShoppingItemId,
) -> QueryResult<bool> {
    use database::schema::shopping_items::dsl::*;
    use diesel::delete;

    let deleted = delete(shopping_items.filter(id.eq(delete_id))).execute(conn)?;
    Ok(deleted > 0)
}

pub fn insert_usage_log(conn: &mut database::Connection, new_log: &NewUsageLog) -> QueryResult<()> {
    use database::schema::usage_logs::dsl::*;
    use diesel::insert_into;

    insert_into(usage_logs).values(new_log).execute(conn)?;
    Ok(())
}

/// Newest first.
pub fn list_usage_logs(conn: &mut database::Connection) -> QueryResult<Vec<UsageLog>> {
    use database::schema::usage_logs::dsl::*;

    usage_logs
        .select(UsageLog::as_select())
        .order_by((created_at.desc(), id.desc()))
        .load(conn)
}

#[cfg(test)]
fn new_ingredient(new_name: &str, new_quantity: f64, new_unit: &str) -> NewIngredient {
    NewIngredient {
        name: new_name.into(),
        quantity: new_quantity,
        unit: new_unit.into(),
        category: database::models::DEFAULT_CATEGORY.into(),
    }
}

#[test]
fn ingredient_crud() {
    let mut conn = database::in_memory();

    let flour = insert_ingredient(&mut conn, &new_ingredient("un", 1.0, "kg")).unwrap();
    let eggs = insert_ingredient(&mut conn, &new_ingredient("yumurta", 10.0, "adet")).unwrap();
    assert_ne!(flour, eggs);

    let names: Vec<_> = list_ingredients(&mut conn)
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, ["un", "yumurta"]);

    let mut egg_row = find_ingredient_by_id(&mut conn, eggs).unwrap().unwrap();
    egg_row.quantity = 4.0;
    egg_row.category = "Süt Ürünü".into();
    update_ingredient(&mut conn, &egg_row).unwrap();
    assert_eq!(
        find_ingredient_by_name(&mut conn, "yumurta").unwrap(),
        Some(egg_row)
    );
    assert_eq!(find_ingredient_by_name(&mut conn, "Yumurta").unwrap(), None);

    update_ingredient_quantity(&mut conn, flour, 0.25).unwrap();
    assert_eq!(
        find_ingredient_by_id(&mut conn, flour).unwrap().unwrap().quantity,
        0.25
    );

    assert_eq!(search_ingredients(&mut conn, "mur").unwrap().len(), 1);

    assert!(delete_ingredient(&mut conn, flour).unwrap());
    assert!(!delete_ingredient(&mut conn, flour).unwrap());
    assert_eq!(find_ingredient_by_id(&mut conn, flour).unwrap(), None);
}

#[test]
fn deleting_recipe_removes_requirements() {
    let mut conn = database::in_memory();

    let flour = insert_ingredient(&mut conn, &new_ingredient("un", 1.0, "kg")).unwrap();
    let new_recipe = NewRecipe {
        name: "kek".into(),
        instructions: String::new(),
        image_url: None,
        category: "Tatlı".into(),
    };
    let cake = insert_recipe(&mut conn, &new_recipe).unwrap();
    let other = insert_recipe(&mut conn, &new_recipe).unwrap();

    for r in [cake, other] {
        insert_requirement(
            &mut conn,
            &NewRecipeRequirement {
                recipe_id: r,
                ingredient_id: flour,
                ingredient_name: "un".into(),
                required_amount: 2.0,
                unit: "su bardağı".into(),
            },
        )
        .unwrap();
    }

    let requirement = list_requirements(&mut conn, cake).unwrap().remove(0);
    assert!(update_requirement(&mut conn, requirement.id, 3.0, "yk").unwrap());
    let requirement = list_requirements(&mut conn, cake).unwrap().remove(0);
    assert_eq!(requirement.required_amount, 3.0);
    assert_eq!(requirement.unit, "yk");

    assert!(delete_recipe(&mut conn, cake).unwrap());
    assert_eq!(find_recipe_by_id(&mut conn, cake).unwrap(), None);
    assert!(list_requirements(&mut conn, cake).unwrap().is_empty());
    assert_eq!(list_requirements(&mut conn, other).unwrap().len(), 1);
}

#[test]
fn shopping_items() {
    let mut conn = database::in_memory();

    let item = NewShoppingItem {
        name: "süt".into(),
        quantity_needed: 2.0,
        unit: "L".into(),
    };
    let milk = insert_shopping_item(&mut conn, &item).unwrap();

    let stored = find_shopping_item_by_id(&mut conn, milk).unwrap().unwrap();
    assert_eq!(stored.name, "süt");
    assert!(!stored.is_bought);

    assert!(delete_shopping_item(&mut conn, milk).unwrap());
    assert!(list_shopping_items(&mut conn).unwrap().is_empty());
}
