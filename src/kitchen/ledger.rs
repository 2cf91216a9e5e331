// Copyright 2023 Remi Bernotavicius

use crate::database::models::{Ingredient, IngredientId};

/// How a stock item was found for a reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution {
    ById,
    ByName,
}

/// A point-in-time copy of the whole stock. Checks and cooks compute everything against one of
/// these and never against rows read part-way through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLedger {
    items: Vec<Ingredient>,
}

impl StockLedger {
    pub fn new(items: Vec<Ingredient>) -> Self {
        Self { items }
    }

    pub fn find_by_id(&self, ingredient_id: IngredientId) -> Option<&Ingredient> {
        self.items.iter().find(|i| i.id == ingredient_id)
    }

    pub fn find_by_name(&self, ingredient_name: &str) -> Option<&Ingredient> {
        let wanted = ingredient_name.to_lowercase();
        self.items.iter().find(|i| i.name.to_lowercase() == wanted)
    }

    /// Looks the ingredient up by id, and only if that finds nothing, by case-insensitive name.
    pub fn resolve(
        &self,
        ingredient_id: IngredientId,
        ingredient_name: &str,
    ) -> Option<(&Ingredient, Resolution)> {
        if let Some(item) = self.find_by_id(ingredient_id) {
            return Some((item, Resolution::ById));
        }

        let item = self.find_by_name(ingredient_name)?;
        log::warn!(
            "ingredient {ingredient_id} not in stock, using {:?} (id {}) by name",
            item.name,
            item.id
        );
        Some((item, Resolution::ByName))
    }

    pub fn find(&self, ingredient_id: IngredientId, ingredient_name: &str) -> Option<&Ingredient> {
        self.resolve(ingredient_id, ingredient_name)
            .map(|(item, _)| item)
    }
}

#[cfg(test)]
pub fn stock_item(id: i32, name: &str, quantity: f64, unit: &str) -> Ingredient {
    Ingredient {
        id: IngredientId(id),
        name: name.into(),
        quantity,
        unit: unit.into(),
        category: crate::database::models::DEFAULT_CATEGORY.into(),
    }
}

#[test]
fn resolves_by_id_before_name() {
    let ledger = StockLedger::new(vec![
        stock_item(1, "Un", 1.0, "kg"),
        stock_item(2, "un", 500.0, "gr"),
    ]);

    let (item, how) = ledger.resolve(IngredientId(2), "Un").unwrap();
    assert_eq!(item.id, IngredientId(2));
    assert_eq!(how, Resolution::ById);
}

#[test]
fn falls_back_to_case_insensitive_name() {
    let ledger = StockLedger::new(vec![
        stock_item(1, "Şeker", 1.0, "kg"),
        stock_item(2, "YUMURTA", 10.0, "adet"),
    ]);

    let (item, how) = ledger.resolve(IngredientId(99), "yumurta").unwrap();
    assert_eq!(item.id, IngredientId(2));
    assert_eq!(how, Resolution::ByName);

    assert_eq!(
        ledger.find(IngredientId(98), "şeker").map(|i| i.id),
        Some(IngredientId(1))
    );
}

#[test]
fn absent_when_neither_matches() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    assert_eq!(ledger.find(IngredientId(2), "unlu mamul"), None);
    assert_eq!(StockLedger::default().find(IngredientId(1), "un"), None);
}
