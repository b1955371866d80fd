//! Derived Totals
//!
//! Client-side line-item math for estimates and invoices, plus progress
//! percentages. The server computes its own figures; these are for display
//! while editing and for lists that only carry raw line items.

use crate::models::LineItem;

/// Computed money figures for a set of line items
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
}

/// subtotal = Σ qty×price, tax on the discounted subtotal
pub fn compute(items: &[LineItem], discount: f64, tax_rate: f64) -> Totals {
    let subtotal: f64 = items.iter().map(LineItem::amount).sum();
    let taxable = subtotal - discount;
    let tax = taxable * tax_rate;
    Totals {
        subtotal,
        discount,
        tax,
        total: taxable + tax,
    }
}

/// Outstanding balance; never negative after overpayment
pub fn amount_due(total: f64, amount_paid: f64) -> f64 {
    (total - amount_paid).max(0.0)
}

/// Percentage (0..=100) of `done` out of `all`, 0 when there is nothing
pub fn percent(done: usize, all: usize) -> u32 {
    if all == 0 {
        return 0;
    }
    ((done as f64 / all as f64) * 100.0).round() as u32
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `$1,234.50` style display
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Parse a form input as a number, treating blanks and junk as zero
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Tax rate entered as a percentage ("8.25") to a fraction (0.0825)
pub fn parse_rate_percent(input: &str) -> f64 {
    parse_amount(input.trim_end_matches('%')) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn item(quantity: f64, unit_price: f64) -> LineItem {
        LineItem {
            description: "Plow".to_string(),
            quantity,
            unit_price,
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_matches_closed_form() {
        let cases: &[(&[(f64, f64)], f64, f64)] = &[
            (&[(2.0, 50.0), (1.0, 25.5)], 10.0, 0.0825),
            (&[(3.0, 19.99)], 0.0, 0.07),
            (&[(1.5, 120.0), (4.0, 12.25), (0.0, 999.0)], 25.0, 0.0),
            (&[], 0.0, 0.1),
        ];
        for (lines, discount, rate) in cases {
            let items: Vec<LineItem> = lines.iter().map(|(q, p)| item(*q, *p)).collect();
            let totals = compute(&items, *discount, *rate);
            let raw: f64 = lines.iter().map(|(q, p)| q * p).sum();
            let expected = (raw - discount) * (1.0 + rate);
            assert!((totals.total - expected).abs() < EPS, "{} vs {}", totals.total, expected);
            assert!((totals.subtotal - raw).abs() < EPS);
            assert!((totals.subtotal - totals.discount + totals.tax - totals.total).abs() < EPS);
        }
    }

    #[test]
    fn test_tax_applies_after_discount() {
        let totals = compute(&[item(1.0, 100.0)], 20.0, 0.1);
        assert!((totals.tax - 8.0).abs() < EPS);
        assert!((totals.total - 88.0).abs() < EPS);
    }

    #[test]
    fn test_amount_due() {
        assert_eq!(amount_due(150.0, 50.0), 100.0);
        assert_eq!(amount_due(150.0, 200.0), 0.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(4, 4), 100);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-42.125), "-$42.13");
        assert_eq!(round_cents(10.005_1), 10.01);
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_amount(" $1,250.75 "), 1250.75);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert!((parse_rate_percent("8.25%") - 0.0825).abs() < EPS);
    }
}
