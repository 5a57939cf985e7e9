//! Renders a category breakdown as a horizontal text bar chart.
//!
//! ```text
//! Expenses by category
//! bills  ██████░░░░░░░░░░░░░░░░░░░░░░░░  €50.00  (20.0%)
//! food   ██████████████████████████████  €200.50 (80.0%)
//! ```

use crate::model::{Amount, AmountFormat, CategoryBreakdown};
use rust_decimal::prelude::ToPrimitive;

/// The bar width used when none is given.
pub const DEFAULT_WIDTH: usize = 30;

/// Renders one bar per category. Bars are scaled so that the largest category fills `width`.
pub fn render(breakdown: &CategoryBreakdown, format: &AmountFormat, width: usize) -> String {
    let max = breakdown.max();
    let rows: Vec<(String, String, String)> = breakdown
        .iter()
        .map(|(category, amount)| {
            (
                category.to_string(),
                bar(amount, max, width),
                amount.format(format),
            )
        })
        .collect();
    let label_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);
    let amount_width = rows.iter().map(|r| r.2.chars().count()).max().unwrap_or(0);

    let mut out = String::from("Expenses by category\n");
    for ((label, bar, amount), (_, value)) in rows.iter().zip(breakdown.iter()) {
        out.push_str(&format!(
            "{label:<label_width$}  {bar}  {amount:<amount_width$} ({:.1}%)\n",
            breakdown.share(value) * 100.0
        ));
    }
    out.push_str(&format!("Total: {}", breakdown.total().format(format)));
    out
}

/// Returns a string like `████████░░░░░░░░░░░░` representing `value / max`.
///
/// The ratio is clamped to `0.0..=1.0` before it is scaled, so the filled length never exceeds
/// `width` and the cast to `usize` cannot wrap.
pub fn bar(value: Amount, max: Amount, width: usize) -> String {
    if max.is_zero() {
        return "░".repeat(width);
    }
    let ratio = (value.value() / max.value())
        .to_f64()
        .unwrap_or_default()
        .clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
