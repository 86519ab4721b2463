use serde::Serialize;

use super::model::{Dataset, DISCOUNT, PROFIT, QUANTITY, SALES};

// ---------------------------------------------------------------------------
// Headline figures
// ---------------------------------------------------------------------------

/// The four summary figures shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_quantity: i64,
    /// Mean discount as a fraction; `None` when no row has a discount.
    pub avg_discount: Option<f64>,
}

/// Compute the metrics of a (filtered) view. Non-numeric cells are skipped.
pub fn aggregate(view: &Dataset) -> Metrics {
    let sum = |column: &str| view.numbers(column).flatten().sum::<f64>();

    let discounts: Vec<f64> = view.numbers(DISCOUNT).flatten().collect();
    let avg_discount = if discounts.is_empty() {
        None
    } else {
        Some(discounts.iter().sum::<f64>() / discounts.len() as f64)
    };

    Metrics {
        total_sales: sum(SALES),
        total_profit: sum(PROFIT),
        total_quantity: sum(QUANTITY) as i64,
        avg_discount,
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Insert `,` every three digits of a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Integer with thousands separators: `1234567` → `1,234,567`.
pub fn format_count(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Whole currency units: `1234.6` → `$1,235`, `-5.0` → `$-5`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        return "$0".to_string();
    }
    format!("${}", format_count(rounded as i64))
}

/// Fraction as a percentage with two decimals, or `N/A`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "N/A".to_string(),
    }
}
