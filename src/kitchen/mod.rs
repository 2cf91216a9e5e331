// Copyright 2023 Remi Bernotavicius

//! Stock keeping: whether a recipe can be cooked, cooking it, and restocking.
//!
//! Every operation reads one snapshot of the stock inside a SQLite `BEGIN IMMEDIATE`
//! transaction, does its arithmetic against that snapshot, and writes its results before the
//! transaction ends. The immediate transaction holds the database write lock from the first read,
//! so two cooks can't both read the same stock and then overwrite each other.

use crate::database;
use crate::database::models::{
    Ingredient, IngredientId, NewIngredient, NewRecipeRequirement, NewShoppingItem, NewUsageLog,
    Recipe, RecipeId, RequirementId, ShoppingItemId, UsageKind, DEFAULT_CATEGORY,
};
use crate::database::query;
use diesel::prelude::Connection as _;
use std::fmt;

pub mod cook;
pub mod ledger;
pub mod shortfall;
pub mod sufficiency;
pub mod unit_conversion;

use ledger::StockLedger;
use sufficiency::Shortfall;

pub const PORTION_UNIT: &str = "porsiyon";

#[derive(Debug)]
pub enum Error {
    Persistence(diesel::result::Error),
    RecipeNotFound(RecipeId),
    IngredientNotFound(IngredientId),
    RequirementNotFound(RequirementId),
    ShoppingItemNotFound(ShoppingItemId),
    InvalidPurchase(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistence(e) => write!(f, "database error: {e}"),
            Self::RecipeNotFound(id) => write!(f, "no recipe with id {id}"),
            Self::IngredientNotFound(id) => write!(f, "no ingredient with id {id}"),
            Self::RequirementNotFound(id) => write!(f, "no recipe requirement with id {id}"),
            Self::ShoppingItemNotFound(id) => write!(f, "no shopping list item with id {id}"),
            Self::InvalidPurchase(amount) => {
                write!(f, "purchased amount must be greater than zero, got {amount}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        Self::Persistence(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reads a quantity typed by a person. Anything unreadable or negative counts as zero.
pub fn parse_quantity(input: &str) -> f64 {
    let trimmed = input.trim();
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            log::warn!("couldn't read quantity {input:?}, using 0");
            0.0
        }
    }
}

/// Whether the item is running low, judged on its unit exactly as stored.
pub fn is_low_stock(item: &Ingredient) -> bool {
    match item.unit.as_str() {
        "kg" | "L" => item.quantity < 0.5,
        "adet" | "paket" | "bardak" => item.quantity < 2.0,
        "gr" | "ml" => item.quantity < 200.0,
        _ => false,
    }
}

/// Result of asking to cook a recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum CookOutcome {
    /// The stock items after deduction.
    Cooked(Vec<Ingredient>),
    /// Nothing was deducted.
    Failed(Vec<Shortfall>),
}

impl CookOutcome {
    pub fn is_cooked(&self) -> bool {
        matches!(self, Self::Cooked(_))
    }

    pub fn shortfall_messages(&self) -> Vec<String> {
        match self {
            Self::Cooked(_) => vec![],
            Self::Failed(shortfalls) => shortfalls.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn snapshot(conn: &mut database::Connection) -> Result<StockLedger> {
    Ok(StockLedger::new(query::list_ingredients(conn)?))
}

pub fn find_recipe(conn: &mut database::Connection, recipe_id: RecipeId) -> Result<Recipe> {
    query::find_recipe_by_id(conn, recipe_id)?.ok_or(Error::RecipeNotFound(recipe_id))
}

pub fn find_ingredient(
    conn: &mut database::Connection,
    ingredient_id: IngredientId,
) -> Result<Ingredient> {
    query::find_ingredient_by_id(conn, ingredient_id)?
        .ok_or(Error::IngredientNotFound(ingredient_id))
}

pub fn check_sufficiency(
    conn: &mut database::Connection,
    recipe: &Recipe,
    portions: u32,
) -> Result<bool> {
    conn.immediate_transaction(|conn| {
        let requirements = query::list_requirements(conn, recipe.id)?;
        let ledger = snapshot(conn)?;
        Ok(sufficiency::is_sufficient(&requirements, portions, &ledger))
    })
}

/// The per-requirement version of [`check_sufficiency`].
pub fn shortfalls(
    conn: &mut database::Connection,
    recipe: &Recipe,
    portions: u32,
) -> Result<Vec<Shortfall>> {
    conn.immediate_transaction(|conn| {
        let requirements = query::list_requirements(conn, recipe.id)?;
        let ledger = snapshot(conn)?;
        Ok(sufficiency::shortfalls(&requirements, portions, &ledger))
    })
}

/// Deducts what `portions` portions of the recipe use from the stock, or nothing at all if any
/// requirement falls short. A successful cook is also recorded in the usage log.
pub fn cook(
    conn: &mut database::Connection,
    recipe: &Recipe,
    portions: u32,
) -> Result<CookOutcome> {
    conn.immediate_transaction(|conn| {
        let requirements = query::list_requirements(conn, recipe.id)?;
        let ledger = snapshot(conn)?;

        let plan = match cook::plan(&requirements, portions, &ledger) {
            Ok(plan) => plan,
            Err(shortfalls) => {
                log::info!(
                    "can't cook {:?} x{portions}: {} shortfall(s)",
                    recipe.name,
                    shortfalls.len()
                );
                return Ok(CookOutcome::Failed(shortfalls));
            }
        };

        for item in &plan.updated {
            query::update_ingredient_quantity(conn, item.id, item.quantity)?;
        }

        let now = chrono::Local::now().naive_local();
        query::insert_usage_log(
            conn,
            &NewUsageLog {
                item_name: recipe.name.clone(),
                item_type: UsageKind::Recipe,
                amount: f64::from(portions),
                unit: PORTION_UNIT.into(),
                created_at: now,
            },
        )?;
        for (name, amount, unit) in plan.consumed {
            query::insert_usage_log(
                conn,
                &NewUsageLog {
                    item_name: name,
                    item_type: UsageKind::Ingredient,
                    amount,
                    unit,
                    created_at: now,
                },
            )?;
        }

        log::info!(
            "cooked {:?} x{portions}, updated {} stock item(s)",
            recipe.name,
            plan.updated.len()
        );
        Ok(CookOutcome::Cooked(plan.updated))
    })
}

/// Puts everything the recipe lacks onto the shopping list and returns how many entries were
/// added.
pub fn add_missing_to_shopping_list(
    conn: &mut database::Connection,
    recipe: &Recipe,
    portions: u32,
) -> Result<usize> {
    conn.immediate_transaction(|conn| {
        let requirements = query::list_requirements(conn, recipe.id)?;
        let ledger = snapshot(conn)?;

        let missing = shortfall::missing_for(&requirements, portions, &ledger);
        for item in &missing {
            query::insert_shopping_item(conn, item)?;
        }
        log::info!(
            "added {} item(s) to the shopping list for {:?} x{portions}",
            missing.len(),
            recipe.name
        );
        Ok(missing.len())
    })
}

/// The recipes out of `recipes` that can be cooked right now, in the order given.
pub fn list_cookable_recipes(
    conn: &mut database::Connection,
    recipes: &[Recipe],
    portions: u32,
) -> Result<Vec<Recipe>> {
    conn.immediate_transaction(|conn| {
        let ledger = snapshot(conn)?;
        let mut cookable = vec![];
        for recipe in recipes {
            let requirements = query::list_requirements(conn, recipe.id)?;
            if sufficiency::is_sufficient(&requirements, portions, &ledger) {
                cookable.push(recipe.clone());
            }
        }
        Ok(cookable)
    })
}

pub fn add_ingredient(
    conn: &mut database::Connection,
    name: &str,
    quantity: &str,
    unit: &str,
    category: Option<&str>,
) -> Result<IngredientId> {
    let new_ingredient = NewIngredient {
        name: name.trim().into(),
        quantity: parse_quantity(quantity),
        unit: unit.trim().into(),
        category: category.unwrap_or(DEFAULT_CATEGORY).into(),
    };
    Ok(query::insert_ingredient(conn, &new_ingredient)?)
}

/// Changes to a stock item. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientEdit {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

/// Applies `edit` to the stored row. The row is read and written back under the write lock, so a
/// cook committed in between is never overwritten.
pub fn edit_ingredient(
    conn: &mut database::Connection,
    ingredient_id: IngredientId,
    edit: IngredientEdit,
) -> Result<Ingredient> {
    conn.immediate_transaction(|conn| {
        let mut item = find_ingredient(conn, ingredient_id)?;
        if let Some(name) = edit.name {
            item.name = name.trim().into();
        }
        if let Some(quantity) = edit.quantity {
            item.quantity = parse_quantity(&quantity);
        }
        if let Some(unit) = edit.unit {
            item.unit = unit.trim().into();
        }
        if let Some(category) = edit.category {
            item.category = category;
        }
        query::update_ingredient(conn, &item)?;
        Ok(item)
    })
}

/// Adds a requirement for `ingredient_id` to the recipe, remembering the ingredient's current
/// name alongside the id.
pub fn add_requirement(
    conn: &mut database::Connection,
    recipe_id: RecipeId,
    ingredient_id: IngredientId,
    amount: &str,
    unit: &str,
) -> Result<RequirementId> {
    conn.transaction(|conn| {
        let recipe = find_recipe(conn, recipe_id)?;
        let ingredient = find_ingredient(conn, ingredient_id)?;
        let new_requirement = NewRecipeRequirement {
            recipe_id: recipe.id,
            ingredient_id: ingredient.id,
            ingredient_name: ingredient.name,
            required_amount: parse_quantity(amount),
            unit: unit.trim().into(),
        };
        Ok(query::insert_requirement(conn, &new_requirement)?)
    })
}

pub fn edit_requirement(
    conn: &mut database::Connection,
    requirement_id: RequirementId,
    amount: &str,
    unit: &str,
) -> Result<()> {
    if query::update_requirement(conn, requirement_id, parse_quantity(amount), unit.trim())? {
        Ok(())
    } else {
        Err(Error::RequirementNotFound(requirement_id))
    }
}

/// Puts one of the ingredient's unit on the shopping list.
pub fn add_to_shopping_list(
    conn: &mut database::Connection,
    ingredient_id: IngredientId,
) -> Result<ShoppingItemId> {
    let ingredient = find_ingredient(conn, ingredient_id)?;
    let new_item = NewShoppingItem {
        name: ingredient.name,
        quantity_needed: 1.0,
        unit: ingredient.unit,
    };
    Ok(query::insert_shopping_item(conn, &new_item)?)
}

/// Credits a shopping list item to the stock and removes it from the list. `amount` is what was
/// actually bought, defaulting to the listed quantity.
///
/// The purchased amount is added to the stock item with the same name as-is, with no unit
/// conversion. If there is no such item a new one is created in the purchased unit.
pub fn buy(
    conn: &mut database::Connection,
    item_id: ShoppingItemId,
    amount: Option<f64>,
) -> Result<Ingredient> {
    conn.immediate_transaction(|conn| {
        let item = query::find_shopping_item_by_id(conn, item_id)?
            .ok_or(Error::ShoppingItemNotFound(item_id))?;
        let bought = amount.unwrap_or(item.quantity_needed);
        if !bought.is_finite() || bought <= 0.0 {
            return Err(Error::InvalidPurchase(bought));
        }

        let stocked = match query::find_ingredient_by_name(conn, &item.name)? {
            Some(mut existing) => {
                if existing.unit != item.unit {
                    log::warn!(
                        "adding {bought} {} of {:?} to stock kept in {}",
                        item.unit,
                        item.name,
                        existing.unit
                    );
                }
                existing.quantity += bought;
                query::update_ingredient_quantity(conn, existing.id, existing.quantity)?;
                existing
            }
            None => {
                let new_ingredient = NewIngredient {
                    name: item.name.clone(),
                    quantity: bought,
                    unit: item.unit.clone(),
                    category: DEFAULT_CATEGORY.into(),
                };
                let id = query::insert_ingredient(conn, &new_ingredient)?;
                find_ingredient(conn, id)?
            }
        };
        query::delete_shopping_item(conn, item.id)?;

        log::info!("bought {bought} {} of {:?}", item.unit, item.name);
        Ok(stocked)
    })
}

#[cfg(test)]
fn setup_recipe(
    conn: &mut database::Connection,
    name: &str,
    requirements: &[(IngredientId, &str, &str)],
) -> Recipe {
    use crate::database::models::NewRecipe;

    let recipe_id = query::insert_recipe(
        conn,
        &NewRecipe {
            name: name.into(),
            instructions: String::new(),
            image_url: None,
            category: DEFAULT_CATEGORY.into(),
        },
    )
    .unwrap();
    for &(ingredient_id, amount, unit) in requirements {
        add_requirement(conn, recipe_id, ingredient_id, amount, unit).unwrap();
    }
    find_recipe(conn, recipe_id).unwrap()
}

#[test]
fn quantities_parse_leniently() {
    assert_eq!(parse_quantity("2.5"), 2.5);
    assert_eq!(parse_quantity(" 1,5 "), 1.5);
    assert_eq!(parse_quantity("iki"), 0.0);
    assert_eq!(parse_quantity(""), 0.0);
    assert_eq!(parse_quantity("NaN"), 0.0);
    assert_eq!(parse_quantity("inf"), 0.0);
    assert_eq!(parse_quantity("-5"), 0.0);
    assert_eq!(parse_quantity("-0,5"), 0.0);
}

#[test]
fn negative_amounts_never_add_stock() {
    let mut conn = database::in_memory();
    let flour = add_ingredient(&mut conn, "un", "-5", "kg", None).unwrap();
    assert_eq!(find_ingredient(&mut conn, flour).unwrap().quantity, 0.0);

    let eggs = add_ingredient(&mut conn, "yumurta", "2", "adet", None).unwrap();
    let recipe = setup_recipe(&mut conn, "menemen", &[(eggs, "-3", "adet")]);
    let requirement = query::list_requirements(&mut conn, recipe.id).unwrap().remove(0);
    assert_eq!(requirement.required_amount, 0.0);

    assert!(cook(&mut conn, &recipe, 2).unwrap().is_cooked());
    assert_eq!(find_ingredient(&mut conn, eggs).unwrap().quantity, 2.0);

    edit_requirement(&mut conn, requirement.id, "-1", "adet").unwrap();
    cook(&mut conn, &recipe, 2).unwrap();
    assert_eq!(find_ingredient(&mut conn, eggs).unwrap().quantity, 2.0);
}

#[test]
fn edits_only_touch_given_fields() {
    let mut conn = database::in_memory();
    let eggs = add_ingredient(&mut conn, "yumurta", "10", "adet", None).unwrap();
    let recipe = setup_recipe(&mut conn, "menemen", &[(eggs, "2", "adet")]);
    cook(&mut conn, &recipe, 3).unwrap();

    let renamed = edit_ingredient(
        &mut conn,
        eggs,
        IngredientEdit {
            name: Some(" Yumurta ".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(renamed.name, "Yumurta");
    assert!((renamed.quantity - 4.0).abs() < 1e-9);
    assert_eq!(find_ingredient(&mut conn, eggs).unwrap(), renamed);

    let restocked = edit_ingredient(
        &mut conn,
        eggs,
        IngredientEdit {
            quantity: Some("12".into()),
            category: Some("Kahvaltılık".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(restocked.quantity, 12.0);
    assert_eq!(restocked.unit, "adet");
    assert_eq!(restocked.category, "Kahvaltılık");

    assert!(matches!(
        edit_ingredient(&mut conn, IngredientId(99), IngredientEdit::default()),
        Err(Error::IngredientNotFound(IngredientId(99)))
    ));
}

#[test]
fn failed_write_leaves_stock_alone() {
    use diesel::connection::SimpleConnection as _;

    let mut conn = database::in_memory();
    let eggs = add_ingredient(&mut conn, "yumurta", "10", "adet", None).unwrap();
    let recipe = setup_recipe(&mut conn, "menemen", &[(eggs, "2", "adet")]);
    let before = query::list_ingredients(&mut conn).unwrap();

    // The stock update goes through, then recording usage fails.
    conn.batch_execute("DROP TABLE usage_logs;").unwrap();
    assert!(matches!(
        cook(&mut conn, &recipe, 1),
        Err(Error::Persistence(_))
    ));
    assert_eq!(query::list_ingredients(&mut conn).unwrap(), before);
}

#[test]
fn cooks_wait_for_other_writers() {
    use std::sync::{Arc, Barrier};
    use std::time::Duration;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.sqlite");
    let mut first = database::establish_connection(&path).unwrap();
    let eggs = add_ingredient(&mut first, "yumurta", "10", "adet", None).unwrap();
    let recipe = setup_recipe(&mut first, "menemen", &[(eggs, "2", "adet")]);
    let mut second = database::establish_connection(&path).unwrap();

    let locked = Arc::new(Barrier::new(2));
    let holder = {
        let locked = locked.clone();
        std::thread::spawn(move || {
            first
                .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
                    locked.wait();
                    std::thread::sleep(Duration::from_millis(300));
                    query::update_ingredient_quantity(conn, eggs, 8.0)
                })
                .unwrap();
            first
        })
    };

    locked.wait();
    assert!(cook(&mut second, &recipe, 1).unwrap().is_cooked());
    let mut first = holder.join().unwrap();
    assert!((find_ingredient(&mut second, eggs).unwrap().quantity - 6.0).abs() < 1e-9);

    assert!(cook(&mut first, &recipe, 1).unwrap().is_cooked());
    assert!((find_ingredient(&mut second, eggs).unwrap().quantity - 4.0).abs() < 1e-9);
}

#[test]
fn low_stock_thresholds() {
    use ledger::stock_item;

    assert!(is_low_stock(&stock_item(1, "un", 0.4, "kg")));
    assert!(!is_low_stock(&stock_item(1, "un", 0.5, "kg")));
    assert!(is_low_stock(&stock_item(1, "süt", 0.2, "L")));
    assert!(!is_low_stock(&stock_item(1, "süt", 0.2, "l")));
    assert!(is_low_stock(&stock_item(1, "yumurta", 1.0, "adet")));
    assert!(!is_low_stock(&stock_item(1, "yumurta", 2.0, "adet")));
    assert!(is_low_stock(&stock_item(1, "tuz", 150.0, "gr")));
    assert!(!is_low_stock(&stock_item(1, "maydanoz", 0.0, "demet")));
}

#[test]
fn cook_deducts_and_logs_usage() {
    let mut conn = database::in_memory();
    let eggs = add_ingredient(&mut conn, "yumurta", "10", "adet", None).unwrap();
    let recipe = setup_recipe(&mut conn, "menemen", &[(eggs, "2", "adet")]);

    assert!(check_sufficiency(&mut conn, &recipe, 3).unwrap());
    let outcome = cook(&mut conn, &recipe, 3).unwrap();
    assert!(outcome.is_cooked());
    assert!(outcome.shortfall_messages().is_empty());

    let stock = find_ingredient(&mut conn, eggs).unwrap();
    assert!((stock.quantity - 4.0).abs() < 1e-9);
    assert_eq!(outcome, CookOutcome::Cooked(vec![stock]));

    let logs = query::list_usage_logs(&mut conn).unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().any(|l| l.item_type == UsageKind::Recipe
        && l.item_name == "menemen"
        && l.amount == 3.0
        && l.unit == PORTION_UNIT));
    assert!(logs.iter().any(|l| l.item_type == UsageKind::Ingredient
        && l.item_name == "yumurta"
        && l.amount == 6.0
        && l.unit == "adet"));

    assert!(!check_sufficiency(&mut conn, &recipe, 3).unwrap());
}

#[test]
fn failed_cook_writes_nothing() {
    let mut conn = database::in_memory();
    let flour = add_ingredient(&mut conn, "un", "1", "kg", None).unwrap();
    let sugar = add_ingredient(&mut conn, "şeker", "100", "gr", None).unwrap();
    let recipe = setup_recipe(
        &mut conn,
        "kek",
        &[(flour, "2", "su bardağı"), (sugar, "1", "su bardağı")],
    );

    let before = query::list_ingredients(&mut conn).unwrap();
    let outcome = cook(&mut conn, &recipe, 1).unwrap();
    assert_eq!(outcome.shortfall_messages(), ["Yetersiz: şeker"]);
    assert_eq!(query::list_ingredients(&mut conn).unwrap(), before);
    assert!(query::list_usage_logs(&mut conn).unwrap().is_empty());

    // Repeating the failed cook changes nothing either.
    cook(&mut conn, &recipe, 1).unwrap();
    assert_eq!(query::list_ingredients(&mut conn).unwrap(), before);
}

#[test]
fn missing_ingredient_blocks_cook() {
    let mut conn = database::in_memory();
    let milk = add_ingredient(&mut conn, "süt", "1", "L", None).unwrap();
    let recipe = setup_recipe(&mut conn, "sütlaç", &[(milk, "1", "su bardağı")]);
    query::delete_ingredient(&mut conn, milk).unwrap();

    let outcome = cook(&mut conn, &recipe, 1).unwrap();
    assert_eq!(outcome.shortfall_messages(), ["Eksik: süt"]);
}

#[test]
fn recreated_ingredient_is_found_by_name() {
    let mut conn = database::in_memory();
    let old = add_ingredient(&mut conn, "Patates", "1", "kg", None).unwrap();
    let recipe = setup_recipe(&mut conn, "kızartma", &[(old, "2", "adet")]);
    query::delete_ingredient(&mut conn, old).unwrap();
    let new = add_ingredient(&mut conn, "patates", "2", "kg", None).unwrap();

    assert!(cook(&mut conn, &recipe, 1).unwrap().is_cooked());
    let stock = find_ingredient(&mut conn, new).unwrap();
    assert!((stock.quantity - 1.6).abs() < 1e-9);
}

#[test]
fn missing_items_go_to_shopping_list() {
    let mut conn = database::in_memory();
    let flour = add_ingredient(&mut conn, "un", "1", "kg", None).unwrap();
    let eggs = add_ingredient(&mut conn, "yumurta", "2", "adet", None).unwrap();
    let recipe = setup_recipe(
        &mut conn,
        "börek",
        &[(flour, "3", "yemek kaşığı"), (eggs, "1", "adet")],
    );

    assert_eq!(add_missing_to_shopping_list(&mut conn, &recipe, 2).unwrap(), 0);
    assert!(query::list_shopping_items(&mut conn).unwrap().is_empty());

    assert_eq!(add_missing_to_shopping_list(&mut conn, &recipe, 40).unwrap(), 2);
    let items = query::list_shopping_items(&mut conn).unwrap();
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["un", "yumurta"]);
    assert!((items[0].quantity_needed - 20.0).abs() < 1e-9);
    assert_eq!(items[0].unit, "yemek kaşığı");
    assert!((items[1].quantity_needed - 38.0).abs() < 1e-9);
    assert_eq!(items[1].unit, "adet");
}

#[test]
fn cookable_recipes_match_check() {
    let mut conn = database::in_memory();
    let flour = add_ingredient(&mut conn, "un", "1", "kg", None).unwrap();
    let eggs = add_ingredient(&mut conn, "yumurta", "3", "adet", None).unwrap();
    let pancake = setup_recipe(
        &mut conn,
        "krep",
        &[(flour, "1", "su bardağı"), (eggs, "1", "adet")],
    );
    let omelette = setup_recipe(&mut conn, "omlet", &[(eggs, "3", "adet")]);
    let empty_plate = setup_recipe(&mut conn, "boş tabak", &[]);

    let all = vec![pancake.clone(), omelette.clone(), empty_plate.clone()];
    for portions in 1..=4 {
        let cookable = list_cookable_recipes(&mut conn, &all, portions).unwrap();
        let expected: Vec<_> = all
            .iter()
            .filter(|r| check_sufficiency(&mut conn, r, portions).unwrap())
            .cloned()
            .collect();
        assert_eq!(cookable, expected);
    }

    assert_eq!(
        list_cookable_recipes(&mut conn, &all, 1).unwrap(),
        [pancake.clone(), omelette, empty_plate.clone()]
    );
    assert_eq!(
        list_cookable_recipes(&mut conn, &all, 3).unwrap(),
        [pancake, empty_plate.clone()]
    );
    assert_eq!(
        list_cookable_recipes(&mut conn, &all, 4).unwrap(),
        [empty_plate]
    );
}

#[test]
fn buying_credits_stock_and_clears_the_entry() {
    let mut conn = database::in_memory();
    let milk = add_ingredient(&mut conn, "süt", "0.5", "L", None).unwrap();
    let listed = add_to_shopping_list(&mut conn, milk).unwrap();

    let stocked = buy(&mut conn, listed, Some(2.0)).unwrap();
    assert_eq!(stocked.id, milk);
    assert_eq!(stocked.quantity, 2.5);
    assert_eq!(find_ingredient(&mut conn, milk).unwrap().quantity, 2.5);
    assert!(query::list_shopping_items(&mut conn).unwrap().is_empty());

    let new_item = NewShoppingItem {
        name: "limon".into(),
        quantity_needed: 4.0,
        unit: "adet".into(),
    };
    let lemons = query::insert_shopping_item(&mut conn, &new_item).unwrap();
    let stocked = buy(&mut conn, lemons, None).unwrap();
    assert_eq!(stocked.name, "limon");
    assert_eq!(stocked.quantity, 4.0);
    assert_eq!(stocked.unit, "adet");
    assert_eq!(stocked.category, DEFAULT_CATEGORY);
}

#[test]
fn rejects_empty_purchase() {
    let mut conn = database::in_memory();
    let new_item = NewShoppingItem {
        name: "limon".into(),
        quantity_needed: 4.0,
        unit: "adet".into(),
    };
    let lemons = query::insert_shopping_item(&mut conn, &new_item).unwrap();

    for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            buy(&mut conn, lemons, Some(amount)),
            Err(Error::InvalidPurchase(_))
        ));
    }
    assert_eq!(query::list_shopping_items(&mut conn).unwrap().len(), 1);
    assert!(query::list_ingredients(&mut conn).unwrap().is_empty());

    assert!(matches!(
        buy(&mut conn, ShoppingItemId(99), None),
        Err(Error::ShoppingItemNotFound(_))
    ));
}

#[test]
fn unknown_recipe_or_ingredient() {
    let mut conn = database::in_memory();
    assert!(matches!(
        find_recipe(&mut conn, RecipeId(1)),
        Err(Error::RecipeNotFound(RecipeId(1)))
    ));
    assert!(matches!(
        add_requirement(&mut conn, RecipeId(1), IngredientId(1), "1", "adet"),
        Err(Error::RecipeNotFound(_))
    ));
    assert!(matches!(
        edit_requirement(&mut conn, RequirementId(1), "1", "adet"),
        Err(Error::RequirementNotFound(_))
    ));
}
