//! Brazilian real currency formatting.
//!
//! Monetary payload fields are rendered as `R$ 1.234,50`: two decimal places,
//! `.` between thousands and `,` before the cents. Input that does not convert
//! to a number is passed through as plain text instead of failing.

use serde_json::Value as JsonValue;

/// Prefix placed before every formatted amount.
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Format a payload value as currency, falling back to its plain text form.
///
/// Numbers, numeric strings and booleans (`true` = 1) are formatted. Anything
/// else, including non-finite numbers, is returned unchanged as text; this
/// function never fails.
pub fn format_currency(value: &JsonValue) -> String {
    match to_amount(value) {
        Some(amount) => format_brl(amount),
        None => plain_text(value),
    }
}

/// Format a finite amount as `R$ <sign><thousands>,<cents>`.
pub fn format_brl(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));
    format!(
        "{}{}{},{}",
        CURRENCY_PREFIX,
        sign,
        group_thousands(whole),
        cents
    )
}

fn to_amount(value: &JsonValue) -> Option<f64> {
    let amount = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        JsonValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

fn plain_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
