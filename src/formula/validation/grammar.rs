//! Grammar check: runs the tokenizer and the shunting-yard converter purely for their
//! failure signal. Nothing is evaluated, so a formula may pass while referencing
//! variables that are never bound.

use crate::formula::error::FormulaError;
use crate::formula::lexing::tokenize;
use crate::formula::parsing::to_postfix;

/// Tokenize and convert, reporting the first failure.
pub fn check_syntax(formula: &str) -> Result<(), FormulaError> {
    let tokens = tokenize(formula)?;
    to_postfix(&tokens)?;
    Ok(())
}

/// `true` when the formula tokenizes and converts cleanly.
pub fn validate_syntax(formula: &str) -> bool {
    check_syntax(formula).is_ok()
}
