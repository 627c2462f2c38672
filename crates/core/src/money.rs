//! Money presentation.
//!
//! Amounts are stored as plain `f64` reais and are never rounded in storage.
//! Rounding to cents happens only here, when a value is rendered.

/// Round to two decimal places (half away from zero).
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Render an amount as Brazilian reais, e.g. `R$ 12.345,67`.
pub fn format_brl(amount: f64) -> String {
    if !amount.is_finite() {
        return "R$ -".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}
