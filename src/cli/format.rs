//! Locale-aware presentation helpers.

use chrono::NaiveDate;

use crate::config::Config;

/// Formats a monetary value with the configured currency symbol and the
/// separator convention of the configured locale.
pub fn format_currency(value: f64, config: &Config) -> String {
    let symbol = currency_symbol(&config.currency);
    let (decimal_sep, thousands_sep) = locale_separators(&config.locale);

    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands_sep);
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol} {grouped}{decimal_sep}{fraction:02}")
}

/// Day-level date in the locale's conventional order.
pub fn format_date(date: NaiveDate, config: &Config) -> String {
    if config.locale.starts_with("en") {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%d/%m/%Y").to_string()
    }
}

/// Month-and-year label used by window headers.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%m/%Y").to_string()
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "BRL" => "R$",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

fn locale_separators(locale: &str) -> (char, char) {
    if locale.starts_with("en") {
        ('.', ',')
    } else {
        (',', '.')
    }
}
