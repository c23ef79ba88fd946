//! US-style display formatting for page values.

use chrono::{DateTime, NaiveDate, Utc};

/// Shown wherever a derived value is undefined.
pub const PLACEHOLDER: &str = "n/a";

pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

/// Fraction as a percentage with two decimals (`0.02` -> `2.00%`).
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) if rate.is_finite() => format!("{:.2}%", rate * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_optional_currency(amount: Option<f64>) -> String {
    amount.map_or_else(|| PLACEHOLDER.to_string(), format_currency)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y, %I:%M %p").to_string()
}

/// `active` -> `Active`.
pub fn status_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
