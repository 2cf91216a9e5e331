// Copyright 2023 Remi Bernotavicius

use super::ledger::StockLedger;
use super::sufficiency::{assess, stock_base, Shortfall};
use super::unit_conversion::base_multiplier;
use crate::database::models::{Ingredient, RecipeRequirement};

/// Everything a successful cook changes, computed from one stock snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CookPlan {
    /// New state of every stock item the recipe draws on, in the order first referenced.
    pub updated: Vec<Ingredient>,
    /// `(ingredient name, amount, unit)` per requirement, as the recipe states them.
    pub consumed: Vec<(String, f64, String)>,
}

/// Verifies every requirement and, only if all of them can be met, works out the new stock
/// quantities. Nothing is written here; on `Err` the caller must write nothing either.
pub fn plan(
    requirements: &[RecipeRequirement],
    portions: u32,
    ledger: &StockLedger,
) -> Result<CookPlan, Vec<Shortfall>> {
    let assessments = assess(requirements, portions, ledger);

    let shortfalls: Vec<_> = assessments.iter().filter_map(|a| a.shortfall()).collect();
    if !shortfalls.is_empty() {
        return Err(shortfalls);
    }

    let mut drawn: Vec<(&Ingredient, f64)> = vec![];
    for a in &assessments {
        let Some(stock) = a.stock else {
            continue;
        };
        match drawn.iter_mut().find(|(item, _)| item.id == stock.id) {
            Some((_, total)) => *total += a.needed_base,
            None => drawn.push((stock, a.needed_base)),
        }
    }

    let updated = drawn
        .into_iter()
        .map(|(stock, total)| {
            let remaining_base = (stock_base(stock) - total).max(0.0);
            let quantity = remaining_base / base_multiplier(&stock.unit, &stock.name);
            log::debug!(
                "{}: {} {} -> {quantity} {}",
                stock.name,
                stock.quantity,
                stock.unit,
                stock.unit
            );
            Ingredient {
                quantity,
                ..stock.clone()
            }
        })
        .collect();

    let consumed = requirements
        .iter()
        .map(|r| {
            (
                r.ingredient_name.clone(),
                r.required_amount * f64::from(portions),
                r.unit.clone(),
            )
        })
        .collect();

    Ok(CookPlan { updated, consumed })
}

#[cfg(test)]
use super::ledger::stock_item;
#[cfg(test)]
use super::sufficiency::requirement;
#[cfg(test)]
use crate::database::models::IngredientId;

#[cfg(test)]
fn quantity_of(plan: &CookPlan, id: i32) -> f64 {
    plan.updated
        .iter()
        .find(|i| i.id == IngredientId(id))
        .unwrap()
        .quantity
}

#[test]
fn eggs_are_deducted_in_their_own_unit() {
    let ledger = StockLedger::new(vec![stock_item(1, "yumurta", 10.0, "adet")]);
    let requirements = [requirement(1, "yumurta", 2.0, "adet")];

    let cooked = plan(&requirements, 3, &ledger).unwrap();
    assert_eq!(cooked.updated.len(), 1);
    assert!((quantity_of(&cooked, 1) - 4.0).abs() < 1e-9);
    assert_eq!(cooked.updated[0].unit, "adet");
    assert_eq!(cooked.consumed, [("yumurta".to_owned(), 6.0, "adet".to_owned())]);
}

#[test]
fn converts_remainder_back_to_stock_unit() {
    let ledger = StockLedger::new(vec![
        stock_item(1, "un", 1.0, "kg"),
        stock_item(2, "süt", 1.0, "L"),
        stock_item(3, "tuz", 100.0, "gr"),
    ]);
    let requirements = [
        requirement(1, "un", 2.0, "su bardağı"),
        requirement(2, "süt", 1.0, "su bardağı"),
        requirement(3, "tuz", 1.0, "çay kaşığı"),
    ];

    let cooked = plan(&requirements, 2, &ledger).unwrap();
    assert!((quantity_of(&cooked, 1) - 0.56).abs() < 1e-9);
    assert!((quantity_of(&cooked, 2) - 0.6).abs() < 1e-9);
    assert!((quantity_of(&cooked, 3) - 88.0).abs() < 1e-9);
}

#[test]
fn noise_within_epsilon_clamps_to_zero() {
    let ledger = StockLedger::new(vec![stock_item(1, "süt", 599.95, "ml")]);
    let requirements = [requirement(1, "süt", 600.0, "ml")];

    let cooked = plan(&requirements, 1, &ledger).unwrap();
    assert_eq!(quantity_of(&cooked, 1), 0.0);
}

#[test]
fn any_shortfall_aborts_the_whole_plan() {
    let ledger = StockLedger::new(vec![
        stock_item(1, "un", 1.0, "kg"),
        stock_item(2, "şeker", 50.0, "gr"),
    ]);
    let requirements = [
        requirement(1, "un", 100.0, "gr"),
        requirement(2, "şeker", 1.0, "su bardağı"),
        requirement(3, "kakao", 2.0, "yk"),
    ];

    let shortfalls = plan(&requirements, 1, &ledger).unwrap_err();
    let messages: Vec<_> = shortfalls.iter().map(|s| s.to_string()).collect();
    assert_eq!(messages, ["Yetersiz: şeker", "Eksik: kakao"]);
}

#[test]
fn shared_stock_item_is_deducted_once_from_the_snapshot() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    let requirements = [
        requirement(1, "un", 200.0, "gr"),
        requirement(1, "un", 3.0, "yemek kaşığı"),
    ];

    let cooked = plan(&requirements, 2, &ledger).unwrap();
    assert_eq!(cooked.updated.len(), 1);
    assert!((quantity_of(&cooked, 1) - 0.54).abs() < 1e-9);

    let requirements = [
        requirement(1, "un", 400.0, "gr"),
        requirement(1, "un", 20.0, "yemek kaşığı"),
    ];
    assert!(plan(&requirements, 2, &ledger).is_err());
}

#[test]
fn found_by_name_when_id_is_stale() {
    let ledger = StockLedger::new(vec![stock_item(5, "Patates", 2.0, "kg")]);
    let requirements = [requirement(1, "patates", 3.0, "adet")];

    let cooked = plan(&requirements, 1, &ledger).unwrap();
    assert_eq!(cooked.updated[0].id, IngredientId(5));
    assert!((quantity_of(&cooked, 5) - 1.4).abs() < 1e-9);
}
