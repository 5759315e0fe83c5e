//! Number formatting for metric cards and tables.

use num_format::{Locale, ToFormattedString};

/// `1234567.891` -> `"$1,234,567.89"`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    // Round on whole cents so 999.999 carries into the dollars.
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// `1234567` -> `"1,234,567"`
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}
