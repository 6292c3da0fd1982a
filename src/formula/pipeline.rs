//! Tokenize -> convert -> evaluate in one call
//!
//! Any stage's failure is surfaced as a [FormulaError], whose message carries the
//! "Evaluation error:" prefix.

use crate::formula::error::FormulaError;
use crate::formula::evaluation::evaluate;
use crate::formula::lexing::tokenize;
use crate::formula::parsing::to_postfix;
use std::collections::HashMap;

/// Evaluate a formula string against the given bindings.
pub fn evaluate_formula(
    formula: &str,
    variables: &HashMap<String, f64>,
) -> Result<f64, FormulaError> {
    let result = tokenize(formula)
        .map_err(FormulaError::from)
        .and_then(|tokens| to_postfix(&tokens).map_err(FormulaError::from))
        .and_then(|rpn| evaluate(&rpn, variables).map_err(FormulaError::from));

    match &result {
        Ok(value) => tracing::debug!(formula, value, "evaluated formula"),
        Err(err) => tracing::debug!(formula, error = %err, "formula evaluation failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::error::{EvalError, LexError, SyntaxError};

    fn eval(formula: &str) -> Result<f64, FormulaError> {
        evaluate_formula(formula, &HashMap::new())
    }

    #[test]
    fn test_composes_all_stages() {
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("(2+3)*4"), Ok(20.0));
        assert_eq!(eval("2^3^2"), Ok(512.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval("-5+3"), Ok(-2.0));
        assert_eq!(eval("3*-2"), Ok(-6.0));
        assert_eq!(eval("-2^2"), Ok(-4.0));
        assert_eq!(eval("2^-1"), Ok(0.5));
        assert_eq!(eval("--3"), Ok(3.0));
        assert_eq!(eval("3*0-2"), Ok(-2.0));
    }

    #[test]
    fn test_bindings() {
        let mut vars = HashMap::new();
        vars.insert("x".to_string(), 3.0);
        vars.insert("y".to_string(), 4.0);
        assert_eq!(evaluate_formula("sqrt(x^2 + y^2)", &vars), Ok(5.0));
    }

    #[test]
    fn test_errors_carry_stage_and_prefix() {
        let err = eval("1/0").unwrap_err();
        assert_eq!(err, FormulaError::Eval(EvalError::DivisionByZero));
        assert_eq!(err.to_string(), "Evaluation error: division by zero");

        let err = eval("(1").unwrap_err();
        assert_eq!(err, FormulaError::Syntax(SyntaxError::MismatchedParentheses));

        let err = eval("1 ? 2").unwrap_err();
        assert!(matches!(err, FormulaError::Lex(LexError::InvalidCharacter { .. })));
        assert!(err.to_string().starts_with("Evaluation error: invalid character"));
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(
            eval("2+"),
            Err(FormulaError::Eval(EvalError::InvalidExpression))
        );
        assert_eq!(
            eval("sqrt()"),
            Err(FormulaError::Eval(EvalError::InvalidFunctionCall))
        );
    }
}
