use crate::cli::core::{short_id, CommandResult, ShellContext};
use crate::cli::format;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{Transaction, TREND_WINDOW_DAYS};

const RECENT_ACTIVITY: usize = 4;
const BAR_WIDTH: usize = 24;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("home", "Balance overview and recent activity", "home", cmd_home),
        CommandEntry::new(
            "history",
            "Every transaction, newest first",
            "history",
            cmd_history,
        ),
        CommandEntry::new(
            "analysis",
            "Spending by category and daily trend",
            "analysis",
            cmd_analysis,
        ),
        CommandEntry::new("categories", "List categories", "categories", cmd_categories),
    ]
}

fn cmd_home(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.tracker().totals();
    output::section("Home");
    output::line(format!(
        "Current balance: {}",
        context.format_money(totals.balance())
    ));
    output::line(format!(
        "Income: {}   Expenses: {}",
        context.format_money(totals.income),
        context.format_money(totals.expense)
    ));

    output::section("Recent activity");
    let history = context.tracker().history();
    if history.is_empty() {
        output::info("No transactions yet. Use `add` to record one.");
        return Ok(());
    }
    for txn in history.into_iter().take(RECENT_ACTIVITY) {
        output::line(transaction_row(context, txn, format::short_day(&txn.date)));
    }
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("History");
    let history = context.tracker().history();
    if history.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    for txn in history {
        output::line(format!(
            "{}  {}",
            short_id(txn.id),
            transaction_row(context, txn, format::long_day(&txn.date))
        ));
    }
    Ok(())
}

fn cmd_analysis(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let breakdown = context.tracker().category_breakdown();
    if breakdown.is_empty() {
        output::section("Analysis");
        output::info("No expenses recorded yet.");
        return Ok(());
    }

    let total: f64 = breakdown.iter().map(|row| row.value).sum();
    output::section("Spending by category");
    output::line(format!("Total spending: {}", context.format_money(total)));
    for row in &breakdown {
        output::line(format!(
            "{:<18} {:>12} {:>5.0}%  {}",
            row.name,
            context.format_money(row.value),
            row.share_of(total),
            row.color
        ));
    }

    let trend = context.tracker().daily_trend();
    output::section(format!("Daily trend (last {} days with spending)", TREND_WINDOW_DAYS));
    let max = trend.iter().map(|day| day.amount).fold(0.0, f64::max);
    for day in &trend {
        output::line(format!(
            "{:<7} {:<width$} {}",
            day.date.format("%b %-d"),
            format::bar(day.amount, max, BAR_WIDTH),
            context.format_money(day.amount),
            width = BAR_WIDTH
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let registry = context.tracker().categories();
    output::section("Categories");
    for category in registry.iter() {
        output::line(format!(
            "{}  [{}] {:<18} {}",
            short_id(category.id),
            category.initial().unwrap_or('?'),
            category.name,
            category.color
        ));
    }
    if registry.len() == 1 {
        output::hint("The last remaining category cannot be deleted.");
    }
    Ok(())
}

fn transaction_row(context: &ShellContext, txn: &Transaction, day: String) -> String {
    let badge = context
        .tracker()
        .categories()
        .lookup(&txn.category)
        .and_then(|category| category.initial())
        .or_else(|| txn.category.chars().next())
        .unwrap_or('?');
    format!(
        "[{}] {:<24} {:<16} {:<12} {}{}",
        badge,
        txn.note,
        txn.category,
        day,
        txn.kind.sign(),
        context.format_money(txn.amount)
    )
}
