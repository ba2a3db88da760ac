//! Pure views derived from the ledger and registry. Nothing here is stored.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{category::CategoryRegistry, transaction::Transaction};

/// Number of day buckets kept by [`daily_trend`].
pub const TREND_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub name: String,
    pub value: f64,
    pub color: String,
}

impl CategorySpend {
    /// Percentage of `total` this category accounts for.
    pub fn share_of(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.value / total * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Calendar day a timestamp belongs to. Grouping and display both go
/// through here so a transaction never lands in different days.
pub fn calendar_day(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Newest first. Equal dates keep their input order.
pub fn sorted_by_date_descending(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut acc, txn| {
            if txn.is_expense() {
                acc.expense += txn.amount;
            } else {
                acc.income += txn.amount;
            }
            acc
        })
}

/// Expense totals per category name, largest first.
pub fn category_breakdown(
    transactions: &[Transaction],
    registry: &CategoryRegistry,
) -> Vec<CategorySpend> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        match slots.get(txn.category.as_str()) {
            Some(&slot) => groups[slot].1 += txn.amount,
            None => {
                slots.insert(txn.category.as_str(), groups.len());
                groups.push((txn.category.as_str(), txn.amount));
            }
        }
    }

    let mut breakdown: Vec<CategorySpend> = groups
        .into_iter()
        .map(|(name, value)| CategorySpend {
            name: name.to_string(),
            value,
            color: registry.color_for(name).to_string(),
        })
        .collect();
    breakdown.sort_by(|a, b| b.value.total_cmp(&a.value));
    breakdown
}

/// Expense per day, oldest first, limited to the latest days that have data.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailySpend> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        *days.entry(calendar_day(&txn.date)).or_insert(0.0) += txn.amount;
    }
    let skip = days.len().saturating_sub(TREND_WINDOW_DAYS);
    days.into_iter()
        .skip(skip)
        .map(|(date, amount)| DailySpend { date, amount })
        .collect()
}
