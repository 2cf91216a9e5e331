// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{
    Ingredient, IngredientId, NewRecipe, Recipe, RecipeId, RequirementId, ShoppingItemId,
    DEFAULT_CATEGORY,
};
use crate::database::query;
use crate::kitchen::{
    self, sufficiency::Shortfall, unit_conversion::Measure, CookOutcome, IngredientEdit,
};
use crate::stats;
use crate::Result;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum IngredientCommand {
    /// Add an item to the stock.
    Add {
        name: String,
        /// Unreadable quantities are stored as 0.
        quantity: String,
        unit: String,
        #[arg(long)]
        category: Option<String>,
    },
    List {
        #[arg(long)]
        category: Option<String>,
        /// Only items running low.
        #[arg(long)]
        low: bool,
        /// Only items whose name contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    Edit {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: i32,
    },
    /// Put one unit of the item on the shopping list.
    Shop {
        id: i32,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        instructions: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    List {
        #[arg(long)]
        category: Option<String>,
        /// Only recipes the stock covers.
        #[arg(long)]
        cookable: bool,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    /// Show a recipe and how the stock covers it.
    Show {
        id: i32,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    Edit {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: i32,
    },
    /// Require an amount of a stock item per portion.
    Require {
        recipe: i32,
        ingredient: i32,
        amount: String,
        unit: String,
    },
    EditRequirement {
        id: i32,
        amount: String,
        unit: String,
    },
    RemoveRequirement {
        id: i32,
    },
}

#[derive(Debug, Subcommand)]
pub enum ShoppingCommand {
    List,
    /// Credit an entry to the stock and take it off the list.
    Buy {
        id: i32,
        /// What was actually bought, if not the listed quantity.
        #[arg(long)]
        amount: Option<String>,
    },
    Delete {
        id: i32,
    },
}

fn format_quantity(q: f64) -> String {
    let s = format!("{q:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".into()
    } else {
        s.into()
    }
}

#[test]
fn quantities_format_compactly() {
    assert_eq!(format_quantity(4.0), "4");
    assert_eq!(format_quantity(0.5), "0.5");
    assert_eq!(format_quantity(0.127), "0.13");
    assert_eq!(format_quantity(1.999), "2");
    assert_eq!(format_quantity(0.0), "0");
    assert_eq!(format_quantity(-0.001), "0");
    assert_eq!(format_quantity(120.0), "120");
}

fn print_ingredient(i: &Ingredient) {
    let low = if kitchen::is_low_stock(i) { "  (low)" } else { "" };
    println!(
        "{:>4}  {:<24} {:>10} {:<14} {}{low}",
        i.id,
        i.name,
        format_quantity(i.quantity),
        i.unit,
        i.category
    );
}

fn print_recipe(r: &Recipe) {
    println!("{:>4}  {:<32} {}", r.id, r.name, r.category);
}

fn print_shortfall(s: &Shortfall) {
    println!("  {s} ({} {})", format_quantity(s.amount()), s.unit());
}

pub fn ingredients(conn: &mut database::Connection, command: IngredientCommand) -> Result<()> {
    match command {
        IngredientCommand::Add {
            name,
            quantity,
            unit,
            category,
        } => {
            let id = kitchen::add_ingredient(conn, &name, &quantity, &unit, category.as_deref())?;
            println!("added {name} as {id}");
        }
        IngredientCommand::List {
            category,
            low,
            search,
        } => {
            let items = match &search {
                Some(text) => query::search_ingredients(conn, text)?,
                None => query::list_ingredients(conn)?,
            };
            for i in items
                .iter()
                .filter(|i| category.as_ref().map_or(true, |c| &i.category == c))
                .filter(|i| !low || kitchen::is_low_stock(i))
            {
                print_ingredient(i);
            }
        }
        IngredientCommand::Edit {
            id,
            name,
            quantity,
            unit,
            category,
        } => {
            let edit = IngredientEdit {
                name,
                quantity,
                unit,
                category,
            };
            let item = kitchen::edit_ingredient(conn, IngredientId(id), edit)?;
            print_ingredient(&item);
        }
        IngredientCommand::Delete { id } => {
            if !query::delete_ingredient(conn, IngredientId(id))? {
                return Err(kitchen::Error::IngredientNotFound(IngredientId(id)).into());
            }
        }
        IngredientCommand::Shop { id } => {
            let item_id = kitchen::add_to_shopping_list(conn, IngredientId(id))?;
            println!("added to the shopping list as {item_id}");
        }
    }
    Ok(())
}

fn show_recipe(conn: &mut database::Connection, recipe: &Recipe, portions: u32) -> Result<()> {
    println!("{} ({})", recipe.name, recipe.category);
    if let Some(image) = &recipe.image_url {
        println!("image: {image}");
    }
    if !recipe.instructions.is_empty() {
        println!("\n{}\n", recipe.instructions);
    }

    for r in query::list_requirements(conn, recipe.id)? {
        println!(
            "{:>4}  {:<24} {:>8} {}",
            r.id,
            r.ingredient_name,
            format_quantity(r.required_amount),
            r.unit
        );
    }

    let shortfalls = kitchen::shortfalls(conn, recipe, portions)?;
    if shortfalls.is_empty() {
        println!("\nstock covers {portions} portion(s)");
    } else {
        println!("\nshort for {portions} portion(s):");
        for s in &shortfalls {
            print_shortfall(s);
        }
    }
    Ok(())
}

pub fn recipes(conn: &mut database::Connection, command: RecipeCommand) -> Result<()> {
    match command {
        RecipeCommand::Add {
            name,
            instructions,
            image,
            category,
        } => {
            let new_recipe = NewRecipe {
                name: name.trim().into(),
                instructions,
                image_url: image,
                category: category.unwrap_or_else(|| DEFAULT_CATEGORY.into()),
            };
            let id = query::insert_recipe(conn, &new_recipe)?;
            println!("added {} as {id}", new_recipe.name);
        }
        RecipeCommand::List {
            category,
            cookable,
            portions,
        } => {
            let mut recipes = query::list_recipes(conn)?;
            if let Some(category) = &category {
                recipes.retain(|r| &r.category == category);
            }
            if cookable {
                recipes = kitchen::list_cookable_recipes(conn, &recipes, portions)?;
            }
            for r in &recipes {
                print_recipe(r);
            }
        }
        RecipeCommand::Show { id, portions } => {
            let recipe = kitchen::find_recipe(conn, RecipeId(id))?;
            show_recipe(conn, &recipe, portions)?;
        }
        RecipeCommand::Edit {
            id,
            name,
            instructions,
            image,
            category,
        } => {
            let mut recipe = kitchen::find_recipe(conn, RecipeId(id))?;
            if let Some(name) = name {
                recipe.name = name;
            }
            if let Some(instructions) = instructions {
                recipe.instructions = instructions;
            }
            if let Some(image) = image {
                recipe.image_url = (!image.is_empty()).then_some(image);
            }
            if let Some(category) = category {
                recipe.category = category;
            }
            query::update_recipe(conn, &recipe)?;
            print_recipe(&recipe);
        }
        RecipeCommand::Delete { id } => {
            if !query::delete_recipe(conn, RecipeId(id))? {
                return Err(kitchen::Error::RecipeNotFound(RecipeId(id)).into());
            }
        }
        RecipeCommand::Require {
            recipe,
            ingredient,
            amount,
            unit,
        } => {
            let id = kitchen::add_requirement(
                conn,
                RecipeId(recipe),
                IngredientId(ingredient),
                &amount,
                &unit,
            )?;
            println!("added requirement {id}");
        }
        RecipeCommand::EditRequirement { id, amount, unit } => {
            kitchen::edit_requirement(conn, RequirementId(id), &amount, &unit)?;
        }
        RecipeCommand::RemoveRequirement { id } => {
            if !query::delete_requirement(conn, RequirementId(id))? {
                return Err(kitchen::Error::RequirementNotFound(RequirementId(id)).into());
            }
        }
    }
    Ok(())
}

pub fn shopping(conn: &mut database::Connection, command: ShoppingCommand) -> Result<()> {
    match command {
        ShoppingCommand::List => {
            for item in query::list_shopping_items(conn)? {
                let bought = if item.is_bought { "  (bought)" } else { "" };
                println!(
                    "{:>4}  {:<24} {:>10} {}{bought}",
                    item.id,
                    item.name,
                    format_quantity(item.quantity_needed),
                    item.unit
                );
            }
        }
        ShoppingCommand::Buy { id, amount } => {
            let amount = amount.as_deref().map(kitchen::parse_quantity);
            let stocked = kitchen::buy(conn, ShoppingItemId(id), amount)?;
            print_ingredient(&stocked);
        }
        ShoppingCommand::Delete { id } => {
            if !query::delete_shopping_item(conn, ShoppingItemId(id))? {
                return Err(kitchen::Error::ShoppingItemNotFound(ShoppingItemId(id)).into());
            }
        }
    }
    Ok(())
}

pub fn check(conn: &mut database::Connection, recipe_id: i32, portions: u32) -> Result<()> {
    let recipe = kitchen::find_recipe(conn, RecipeId(recipe_id))?;
    if kitchen::check_sufficiency(conn, &recipe, portions)? {
        println!("{}: enough stock for {portions} portion(s)", recipe.name);
    } else {
        println!("{}: not enough stock for {portions} portion(s)", recipe.name);
    }
    Ok(())
}

pub fn cook(conn: &mut database::Connection, recipe_id: i32, portions: u32) -> Result<()> {
    let recipe = kitchen::find_recipe(conn, RecipeId(recipe_id))?;
    let outcome = kitchen::cook(conn, &recipe, portions)?;
    if !outcome.is_cooked() {
        println!("can't cook {}:", recipe.name);
        for message in outcome.shortfall_messages() {
            println!("  {message}");
        }
        return Ok(());
    }

    println!("cooked {portions} portion(s) of {}", recipe.name);
    if let CookOutcome::Cooked(updated) = &outcome {
        for i in updated {
            print_ingredient(i);
        }
    }
    Ok(())
}

pub fn missing(conn: &mut database::Connection, recipe_id: i32, portions: u32) -> Result<()> {
    let recipe = kitchen::find_recipe(conn, RecipeId(recipe_id))?;
    match kitchen::add_missing_to_shopping_list(conn, &recipe, portions)? {
        0 => println!("stock is sufficient for {portions} portion(s)"),
        n => println!("{n} missing item(s) added to the shopping list"),
    }
    Ok(())
}

pub fn cookable(conn: &mut database::Connection, portions: u32) -> Result<()> {
    let recipes = query::list_recipes(conn)?;
    for r in &kitchen::list_cookable_recipes(conn, &recipes, portions)? {
        print_recipe(r);
    }
    Ok(())
}

pub fn units(ingredient: Option<&str>) {
    let name = ingredient.unwrap_or_default();
    for measure in Measure::iter() {
        println!(
            "{:<28} {:>8}",
            measure.to_string(),
            format_quantity(measure.base_units(name))
        );
    }
}

pub fn stats(conn: &mut database::Connection, limit: usize) -> Result<()> {
    println!("most cooked:");
    for (n, s) in stats::top_recipes(conn, limit)?.iter().enumerate() {
        println!("{:>3}. {:<24} {}", n + 1, s.name, format_quantity(s.total));
    }

    println!("\nmost used:");
    for (n, s) in stats::top_ingredients(conn, limit)?.iter().enumerate() {
        println!("{:>3}. {:<24} {}", n + 1, s.name, format_quantity(s.total));
    }

    println!("\nrecent:");
    for log in stats::recent(conn, limit)? {
        println!(
            "{:>4}  {}  {:<10} {:<24} {} {}",
            log.id,
            log.created_at.format("%Y-%m-%d %H:%M"),
            log.item_type,
            log.item_name,
            format_quantity(log.amount),
            log.unit
        );
    }
    Ok(())
}
