//! Display helpers for results and token sequences.

use crate::formula::config::DisplayConfig;
use crate::formula::token::Token;

/// Render a number for display using the default thresholds.
///
/// Magnitudes below 1e-4 or above 9999 use exponential notation (`1.2346e+4`), anything
/// else uses fixed notation with trailing zeros removed (`2.5`, `14`).
pub fn format_number(value: f64) -> String {
    format_number_with(value, &DisplayConfig::default())
}

pub fn format_number_with(value: f64, display: &DisplayConfig) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude < display.small_threshold || magnitude > display.large_threshold {
        exponential(value, display.fixed_digits)
    } else {
        fixed(value, display.fixed_digits)
    }
}

/// `{:.Ne}` with an explicit exponent sign: `1.2346e4` becomes `1.2346e+4`.
fn exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

fn fixed(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*}", digits, value);
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Space-separated rendering of any token sequence, infix or postfix.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
