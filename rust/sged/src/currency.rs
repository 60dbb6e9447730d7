//! Metical (MZN) amounts, pt-MZ convention: `1 234,50 MTn`.

use serde::Serialize;

pub const MZN_SYMBOL: &str = "MTn";
const NBSP: char = '\u{a0}';

/// Formats an amount with grouped thousands, two decimals and the metical
/// symbol. Negative amounts keep a leading minus; non-finite input renders as
/// zero.
pub fn format_mzn(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let digits = cent_digits(amount.abs());
    let (whole, frac) = digits.split_at(digits.len() - 2);

    let mut out = String::with_capacity(whole.len() * 2 + 8);
    if amount < 0.0 && digits.bytes().any(|b| b != b'0') {
        out.push('-');
    }
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(frac);
    out.push(NBSP);
    out.push_str(MZN_SYMBOL);
    out
}

// Decimal digits of the amount in whole cents, at least three long. Built from
// the float's own integer expansion so no magnitude saturates.
fn cent_digits(abs: f64) -> String {
    let cents = (abs * 100.0).round();
    if cents.is_finite() {
        format!("{:03.0}", cents)
    } else {
        format!("{:.0}00", abs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInput {
    /// What the field should now show.
    pub display: String,
    /// Parsed value rounded to cents; `None` when the text is not yet a number
    /// (a lone `.`), in which case the stored amount is left unchanged.
    pub amount: Option<f64>,
}

/// Keeps digits and the first decimal point of typed currency text.
pub fn sanitize_currency_input(input: &str) -> CurrencyInput {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let display = match kept.split_once('.') {
        Some((int, rest)) => format!("{}.{}", int, rest.replace('.', "")),
        None => kept,
    };

    let amount = if display.is_empty() {
        Some(0.0)
    } else {
        display
            .parse::<f64>()
            .ok()
            .map(|v| (v * 100.0).round() / 100.0)
    };
    CurrencyInput { display, amount }
}
