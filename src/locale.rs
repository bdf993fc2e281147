//! Danish-locale numeric text handling for grid cells.
//!
//! Every numeric cell in the grid is a Danish-formatted string (`.` groups
//! thousands, `,` is the decimal separator, optional `" DKK"` suffix). Parsing
//! never fails: malformed text degrades to zero so a stray keystroke cannot
//! crash a recompute chain.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the synthetic `R<row>C<col>` token marking a cell that was never
/// populated, as opposed to a real zero.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[Rr]\d+[Cc]\d+").unwrap());

const CURRENCY_SUFFIX: &str = " DKK";

/// Parses Danish-formatted numeric text. Empty, digit-less, or otherwise
/// unparseable input yields `0.0`.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return 0.0;
    }
    let body = trimmed.strip_suffix(CURRENCY_SUFFIX).unwrap_or(trimmed);
    let normalized = body.replace('.', "").replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(input = %text, "numeric text did not parse, using 0");
            0.0
        }
    }
}

/// Renders a number with two fraction digits, `.` grouping and `,` decimal
/// separator. Non-finite input renders as `"0,00"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0,00".to_string();
    }
    let body = format!("{:.2}", value);
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    format!("{}{},{}", sign, group_digits(digits, '.'), frac_part)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

/// True iff `text` holds a genuine number: at least one digit and not a
/// placeholder token. Decides whether an override ("2") column takes effect.
pub fn is_real_value(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) && !PLACEHOLDER.is_match(text)
}
