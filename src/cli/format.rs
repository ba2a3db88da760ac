use chrono::{DateTime, Utc};

use crate::ledger::calendar_day;

/// Formats `amount` with two decimals and thousands separators.
pub fn money(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Short day label such as `Mar 4`.
pub fn short_day(timestamp: &DateTime<Utc>) -> String {
    calendar_day(timestamp).format("%b %-d").to_string()
}

/// Day label with year such as `Mar 4, 2025`.
pub fn long_day(timestamp: &DateTime<Utc>) -> String {
    calendar_day(timestamp).format("%b %-d, %Y").to_string()
}

/// Horizontal bar scaled against `max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "#".repeat(filled.clamp(1, width))
}
