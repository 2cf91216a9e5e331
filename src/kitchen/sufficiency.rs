// Copyright 2023 Remi Bernotavicius

use super::ledger::StockLedger;
use super::unit_conversion::base_multiplier;
use crate::database::models::{Ingredient, IngredientId, RecipeRequirement};
use std::collections::HashMap;
use std::fmt;

/// Slack, in base units, allowed when comparing stock against need.
pub const EPSILON: f64 = 0.1;

pub fn stock_base(item: &Ingredient) -> f64 {
    item.quantity * base_multiplier(&item.unit, &item.name)
}

pub fn needed_base(requirement: &RecipeRequirement, portions: u32) -> f64 {
    requirement.required_amount
        * f64::from(portions)
        * base_multiplier(&requirement.unit, &requirement.ingredient_name)
}

/// A requirement that can't be met from the stock.
#[derive(Debug, Clone, PartialEq)]
pub enum Shortfall {
    /// Nothing in stock matches the requirement. `amount` is the full need.
    Missing {
        ingredient_name: String,
        amount: f64,
        unit: String,
    },
    /// The stock item exists but holds too little. `amount` is what is lacking, in the
    /// requirement's unit.
    Insufficient {
        ingredient_name: String,
        stock_name: String,
        amount: f64,
        unit: String,
    },
}

impl Shortfall {
    pub fn amount(&self) -> f64 {
        match self {
            Self::Missing { amount, .. } | Self::Insufficient { amount, .. } => *amount,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            Self::Missing { unit, .. } | Self::Insufficient { unit, .. } => unit,
        }
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                ingredient_name, ..
            } => write!(f, "Eksik: {ingredient_name}"),
            Self::Insufficient {
                ingredient_name, ..
            } => write!(f, "Yetersiz: {ingredient_name}"),
        }
    }
}

/// One requirement measured against the stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment<'a> {
    pub requirement: &'a RecipeRequirement,
    pub stock: Option<&'a Ingredient>,
    pub needed_base: f64,
    /// What is left of the stock item for this requirement once the requirements before it that
    /// draw on the same item have taken their share. Zero when there is no stock item.
    pub available_base: f64,
}

impl Assessment<'_> {
    pub fn is_satisfied(&self) -> bool {
        self.stock.is_some() && self.available_base >= self.needed_base - EPSILON
    }

    /// Base units still needed, never negative.
    pub fn missing_base(&self) -> f64 {
        (self.needed_base - self.available_base).max(0.0)
    }

    pub fn shortfall(&self) -> Option<Shortfall> {
        if self.is_satisfied() {
            return None;
        }

        let requirement = self.requirement;
        Some(match self.stock {
            None => Shortfall::Missing {
                ingredient_name: requirement.ingredient_name.clone(),
                amount: self.needed_base
                    / base_multiplier(&requirement.unit, &requirement.ingredient_name),
                unit: requirement.unit.clone(),
            },
            Some(stock) => Shortfall::Insufficient {
                ingredient_name: requirement.ingredient_name.clone(),
                stock_name: stock.name.clone(),
                amount: self.missing_base()
                    / base_multiplier(&requirement.unit, &requirement.ingredient_name),
                unit: requirement.unit.clone(),
            },
        })
    }
}

/// Measures every requirement for `portions` portions against the one `ledger` snapshot.
pub fn assess<'a>(
    requirements: &'a [RecipeRequirement],
    portions: u32,
    ledger: &'a StockLedger,
) -> Vec<Assessment<'a>> {
    let mut drawn: HashMap<IngredientId, f64> = HashMap::new();

    requirements
        .iter()
        .map(|requirement| {
            let needed_base = needed_base(requirement, portions);
            let stock = ledger.find(requirement.ingredient_id, &requirement.ingredient_name);
            let available_base = match stock {
                Some(item) => {
                    let taken = drawn.entry(item.id).or_default();
                    let available = (stock_base(item) - *taken).max(0.0);
                    *taken += needed_base;
                    available
                }
                None => 0.0,
            };
            log::debug!(
                "{}: need {needed_base} base units, {available_base} available",
                requirement.ingredient_name
            );
            Assessment {
                requirement,
                stock,
                needed_base,
                available_base,
            }
        })
        .collect()
}

/// True when every requirement can be met. An empty list always can.
pub fn is_sufficient(
    requirements: &[RecipeRequirement],
    portions: u32,
    ledger: &StockLedger,
) -> bool {
    assess(requirements, portions, ledger)
        .iter()
        .all(Assessment::is_satisfied)
}

pub fn shortfalls(
    requirements: &[RecipeRequirement],
    portions: u32,
    ledger: &StockLedger,
) -> Vec<Shortfall> {
    assess(requirements, portions, ledger)
        .iter()
        .filter_map(Assessment::shortfall)
        .collect()
}

#[cfg(test)]
pub fn requirement(ingredient_id: i32, name: &str, amount: f64, unit: &str) -> RecipeRequirement {
    use crate::database::models::{RecipeId, RequirementId};

    RecipeRequirement {
        id: RequirementId(ingredient_id),
        recipe_id: RecipeId(1),
        ingredient_id: IngredientId(ingredient_id),
        ingredient_name: name.into(),
        required_amount: amount,
        unit: unit.into(),
    }
}

#[cfg(test)]
use super::ledger::stock_item;

#[test]
fn empty_requirements_are_sufficient() {
    assert!(is_sufficient(&[], 3, &StockLedger::default()));
}

#[test]
fn flour_by_the_tablespoon() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    let requirements = [requirement(1, "un", 3.0, "yemek kaşığı")];

    assert!(is_sufficient(&requirements, 20, &ledger));
    assert!(shortfalls(&requirements, 20, &ledger).is_empty());

    assert!(!is_sufficient(&requirements, 40, &ledger));
    let short = shortfalls(&requirements, 40, &ledger);
    assert_eq!(short.len(), 1);
    assert!(matches!(short[0], Shortfall::Insufficient { .. }));
    assert!((short[0].amount() - 20.0).abs() < 1e-9);
    assert_eq!(short[0].unit(), "yemek kaşığı");
    assert_eq!(short[0].to_string(), "Yetersiz: un");
}

#[test]
fn missing_ingredient_is_never_sufficient() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 1.0, "kg")]);
    let requirements = [requirement(7, "süt", 1.0, "su bardağı")];

    assert!(!is_sufficient(&requirements, 1, &ledger));
    assert_eq!(
        shortfalls(&requirements, 2, &ledger),
        [Shortfall::Missing {
            ingredient_name: "süt".into(),
            amount: 2.0,
            unit: "su bardağı".into(),
        }]
    );
}

#[test]
fn tolerates_floating_point_noise() {
    let ledger = StockLedger::new(vec![stock_item(1, "süt", 0.59995, "L")]);
    let requirements = [requirement(1, "süt", 200.0, "ml")];

    assert!(is_sufficient(&requirements, 3, &ledger));
    assert!(!is_sufficient(&requirements, 4, &ledger));
}

#[test]
fn shared_stock_item_is_drawn_cumulatively() {
    let ledger = StockLedger::new(vec![stock_item(1, "un", 500.0, "gr")]);
    let requirements = [
        requirement(1, "un", 300.0, "gr"),
        requirement(1, "un", 300.0, "gr"),
    ];

    let assessments = assess(&requirements, 1, &ledger);
    assert!(assessments[0].is_satisfied());
    assert!(!assessments[1].is_satisfied());
    assert_eq!(assessments[1].available_base, 200.0);
    assert!(!is_sufficient(&requirements, 1, &ledger));
}

#[test]
fn units_are_compared_in_base_units() {
    let ledger = StockLedger::new(vec![
        stock_item(1, "yumurta", 10.0, "adet"),
        stock_item(2, "pirinç", 1.0, "kg"),
    ]);
    let requirements = [
        requirement(1, "yumurta", 250.0, "gr"),
        requirement(2, "pirinç", 2.0, "su bardağı"),
    ];

    assert!(is_sufficient(&requirements, 2, &ledger));
    assert!(!is_sufficient(&requirements, 3, &ledger));
}
