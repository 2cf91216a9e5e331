// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{UsageKind, UsageLog};
use crate::database::query;
use diesel::QueryResult;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct UsageStat {
    pub name: String,
    pub total: f64,
}

/// Sums the amounts per name. Largest totals first, ties broken by name.
fn totals<'a>(logs: impl IntoIterator<Item = &'a UsageLog>, limit: usize) -> Vec<UsageStat> {
    let mut by_name: BTreeMap<&str, f64> = BTreeMap::new();
    for usage in logs {
        *by_name.entry(&usage.item_name).or_default() += usage.amount;
    }

    let mut stats: Vec<_> = by_name
        .into_iter()
        .map(|(name, total)| UsageStat {
            name: name.into(),
            total,
        })
        .collect();
    stats.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    stats.truncate(limit);
    stats
}

fn top(
    conn: &mut database::Connection,
    kind: UsageKind,
    limit: usize,
) -> QueryResult<Vec<UsageStat>> {
    let logs = query::list_usage_logs(conn)?;
    Ok(totals(logs.iter().filter(|l| l.item_type == kind), limit))
}

/// Most cooked recipes, counted in portions.
pub fn top_recipes(conn: &mut database::Connection, limit: usize) -> QueryResult<Vec<UsageStat>> {
    top(conn, UsageKind::Recipe, limit)
}

/// Most used ingredients. Amounts in different units are added together as they are.
pub fn top_ingredients(
    conn: &mut database::Connection,
    limit: usize,
) -> QueryResult<Vec<UsageStat>> {
    top(conn, UsageKind::Ingredient, limit)
}

pub fn recent(conn: &mut database::Connection, limit: usize) -> QueryResult<Vec<UsageLog>> {
    let mut logs = query::list_usage_logs(conn)?;
    logs.truncate(limit);
    Ok(logs)
}

#[cfg(test)]
fn log_usage(conn: &mut database::Connection, name: &str, kind: UsageKind, amount: f64) {
    use crate::database::models::NewUsageLog;

    query::insert_usage_log(
        conn,
        &NewUsageLog {
            item_name: name.into(),
            item_type: kind,
            amount,
            unit: "adet".into(),
            created_at: chrono::Local::now().naive_local(),
        },
    )
    .unwrap();
}

#[test]
fn top_lists() {
    use maplit::btreemap;

    let mut conn = database::in_memory();
    let usages = btreemap! {
        "menemen" => (UsageKind::Recipe, vec![2.0, 1.0]),
        "kek" => (UsageKind::Recipe, vec![3.0]),
        "çorba" => (UsageKind::Recipe, vec![1.0]),
        "yumurta" => (UsageKind::Ingredient, vec![4.0, 2.0, 6.0]),
        "un" => (UsageKind::Ingredient, vec![0.5]),
    };
    for (name, (kind, amounts)) in &usages {
        for amount in amounts {
            log_usage(&mut conn, name, *kind, *amount);
        }
    }

    let recipes = top_recipes(&mut conn, 2).unwrap();
    assert_eq!(
        recipes,
        [
            UsageStat {
                name: "kek".into(),
                total: 3.0
            },
            UsageStat {
                name: "menemen".into(),
                total: 3.0
            },
        ]
    );

    let ingredients = top_ingredients(&mut conn, 10).unwrap();
    let names: Vec<_> = ingredients.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["yumurta", "un"]);
    assert_eq!(ingredients[0].total, 12.0);

    assert_eq!(recent(&mut conn, 3).unwrap().len(), 3);
    assert_eq!(recent(&mut conn, 100).unwrap().len(), 8);
}

#[test]
fn empty_log() {
    let mut conn = database::in_memory();
    assert!(top_recipes(&mut conn, 5).unwrap().is_empty());
    assert!(recent(&mut conn, 5).unwrap().is_empty());
}
