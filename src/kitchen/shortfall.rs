// Copyright 2023 Remi Bernotavicius

use super::ledger::StockLedger;
use super::sufficiency::assess;
use super::unit_conversion::base_multiplier;
use crate::database::models::{NewShoppingItem, RecipeRequirement};

/// Shopping list entries covering whatever `portions` portions need beyond the stock, each in the
/// unit the recipe asks for. Present-but-short items are listed under the stock item's name so
/// that buying them credits that item. Empty when the stock covers everything.
pub fn missing_for(
    requirements: &[RecipeRequirement],
    portions: u32,
    ledger: &StockLedger,
) -> Vec<NewShoppingItem> {
    assess(requirements, portions, ledger)
        .into_iter()
        .filter_map(|a| {
            let requirement = a.requirement;
            match a.stock {
                None => Some(NewShoppingItem {
                    name: requirement.ingredient_name.clone(),
                    quantity_needed: requirement.required_amount * f64::from(portions),
                    unit: requirement.unit.clone(),
                }),
                Some(stock) if a.available_base < a.needed_base => Some(NewShoppingItem {
                    name: stock.name.clone(),
                    quantity_needed: (a.needed_base - a.available_base)
                        / base_multiplier(&requirement.unit, &requirement.ingredient_name),
                    unit: requirement.unit.clone(),
                }),
                Some(_) => None,
            }
        })
        .collect()
}

#[cfg(test)]
use super::ledger::stock_item;
#[cfg(test)]
use super::sufficiency::requirement;

#[test]
fn nothing_missing() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    let requirements = [requirement(1, "un", 3.0, "yemek kaşığı")];
    assert!(missing_for(&requirements, 20, &ledger).is_empty());
    assert!(missing_for(&[], 20, &ledger).is_empty());
}

#[test]
fn short_items_use_stock_name_and_recipe_unit() {
    let ledger = StockLedger::new(vec![stock_item(3, "Un", 1.0, "kg")]);
    let requirements = [requirement(1, "un", 3.0, "yemek kaşığı")];

    let missing = missing_for(&requirements, 40, &ledger);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Un");
    assert_eq!(missing[0].unit, "yemek kaşığı");
    assert!((missing[0].quantity_needed - 20.0).abs() < 1e-9);
}

#[test]
fn absent_items_get_the_full_amount() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    let requirements = [
        requirement(1, "un", 100.0, "gr"),
        requirement(2, "yumurta", 2.0, "adet"),
    ];

    assert_eq!(
        missing_for(&requirements, 3, &ledger),
        [NewShoppingItem {
            name: "yumurta".into(),
            quantity_needed: 6.0,
            unit: "adet".into(),
        }]
    );
}

#[test]
fn any_positive_gap_is_listed() {
    let ledger = StockLedger::new(vec![stock_item(1, "süt", 599.95, "ml")]);
    let requirements = [requirement(1, "süt", 3.0, "su bardağı")];

    let missing = missing_for(&requirements, 1, &ledger);
    assert_eq!(missing.len(), 1);
    assert!((missing[0].quantity_needed - 0.05 / 200.0).abs() < 1e-9);
}
