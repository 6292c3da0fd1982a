//! Best-effort listing of the variables a formula references.

use crate::formula::lexing::tokenize;
use crate::formula::token::Token;

/// Distinct variable names in first-occurrence order.
///
/// This is a convenience query, not a validation gate: if the formula does not tokenize
/// the result is empty.
pub fn extract_variables(formula: &str) -> Vec<String> {
    let tokens = match tokenize(formula) {
        Ok(tokens) => tokens,
        Err(err) => {
            tracing::debug!(error = %err, "variable extraction skipped");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = Vec::new();
    for token in tokens {
        if let Token::Variable(name) = token {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
