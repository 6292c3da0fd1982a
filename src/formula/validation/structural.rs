//! Regex-based structural pre-validator
//!
//! Rejects malformed input with the most specific user-facing reason before any
//! tokenizing is attempted. Rules run in a fixed order and the first failure wins:
//!
//! 1. emptiness
//! 2. length (after whitespace removal)
//! 3. character whitelist
//! 4. consecutive operators
//! 5. parenthesis balance and emptiness
//! 6. function names at call sites
//! 7. trailing, then leading operator placement
//! 8. numeric literal well-formedness
//!
//! All rules except emptiness look at the formula with whitespace removed, so `2 - -3`
//! is rejected for consecutive operators.

use crate::formula::config::ValidationLimits;
use crate::formula::error::StructuralError;
use crate::formula::token::Function;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static FORMULA_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9+\-*/^().]+$").unwrap());

static CONSECUTIVE_OPERATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+\-*/^]{2,}").unwrap());

static EMPTY_PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").unwrap());

static FUNCTION_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-zA-Z]+)\s*\(").unwrap());

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.]+").unwrap());

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '^'];

const NON_LEADING_OPERATORS: &[char] = &['*', '/', '^'];

/// Structural validator carrying its configured limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    limits: ValidationLimits,
}

impl Validator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Run every rule in order, returning the first failure.
    pub fn validate(&self, formula: &str) -> Result<(), StructuralError> {
        if formula.is_empty() {
            return Err(StructuralError::Missing);
        }

        let clean = WHITESPACE.replace_all(formula, "");
        let clean = clean.as_ref();

        let result = check_not_empty(clean)
            .and_then(|_| self.check_length(clean))
            .and_then(|_| check_characters(clean))
            .and_then(|_| check_consecutive_operators(clean))
            .and_then(|_| check_parentheses(clean))
            .and_then(|_| check_functions(clean))
            .and_then(|_| check_operator_placement(clean))
            .and_then(|_| check_numbers(clean));

        if let Err(err) = &result {
            tracing::debug!(reason = %err, "structural validation failed");
        }
        result
    }

    fn check_length(&self, clean: &str) -> Result<(), StructuralError> {
        if clean.chars().count() > self.limits.max_formula_length {
            return Err(StructuralError::TooLong {
                max: self.limits.max_formula_length,
            });
        }
        Ok(())
    }
}

fn check_not_empty(clean: &str) -> Result<(), StructuralError> {
    if clean.is_empty() {
        return Err(StructuralError::Empty);
    }
    Ok(())
}

fn check_characters(clean: &str) -> Result<(), StructuralError> {
    if !FORMULA_CHARS.is_match(clean) {
        return Err(StructuralError::InvalidCharacters);
    }
    Ok(())
}

fn check_consecutive_operators(clean: &str) -> Result<(), StructuralError> {
    if CONSECUTIVE_OPERATORS.is_match(clean) {
        return Err(StructuralError::ConsecutiveOperators);
    }
    Ok(())
}

/// Balance first (closing before opening), then empty groups.
pub fn check_parentheses(formula: &str) -> Result<(), StructuralError> {
    let mut depth: usize = 0;
    for ch in formula.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(StructuralError::UnmatchedClosingParenthesis)?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(StructuralError::UnmatchedOpeningParenthesis);
    }
    if EMPTY_PARENTHESES.is_match(formula) {
        return Err(StructuralError::EmptyParentheses);
    }
    Ok(())
}

/// Every `name(` call site must name a known function.
pub fn check_functions(formula: &str) -> Result<(), StructuralError> {
    for captures in FUNCTION_CALL.captures_iter(formula) {
        let name = &captures[1];
        if !Function::is_function_name(name) {
            return Err(StructuralError::UnknownFunction(name.to_string()));
        }
    }
    Ok(())
}

fn check_operator_placement(clean: &str) -> Result<(), StructuralError> {
    if clean.ends_with(OPERATOR_CHARS) {
        return Err(StructuralError::TrailingOperator);
    }
    if clean.starts_with(NON_LEADING_OPERATORS) {
        return Err(StructuralError::LeadingOperator);
    }
    Ok(())
}

fn check_numbers(clean: &str) -> Result<(), StructuralError> {
    for literal in NUMERIC_LITERAL.find_iter(clean).map(|m| m.as_str()) {
        let well_formed = literal.matches('.').count() <= 1
            && literal.parse::<f64>().is_ok_and(f64::is_finite);
        if !well_formed {
            return Err(StructuralError::InvalidNumber(literal.to_string()));
        }
    }
    Ok(())
}
