//! Property-based tests for the formula engine
//!
//! Arbitrary input must never panic any stage, and well-formed generated formulas must
//! always make it through every stage.

use formula_engine::{
    evaluate, evaluate_formula, extract_variables, to_postfix, tokenize, validate_formula,
    validate_syntax, Token,
};
use proptest::prelude::*;
use std::collections::HashMap;

/// Strings drawn from the formula alphabet plus a few characters it rejects
fn formula_like() -> impl Strategy<Value = String> {
    "[0-9a-z+\\-*/^(). #_]{0,40}"
}

/// Small well-formed formulas over `x` and `y`
fn well_formed() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        Just("x".to_string()),
        Just("y".to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), "[+\\-*/^]", inner.clone())
                .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b)),
            inner.clone().prop_map(|a| format!("({})", a)),
            inner.clone().prop_map(|a| format!("-{}", a)),
            ("sin|cos|abs", inner).prop_map(|(f, a)| format!("{}({})", f, a)),
        ]
    })
}

/// Parenthesis-heavy strings that always tokenize
fn paren_soup() -> impl Strategy<Value = String> {
    "[-()2x^+* ]{0,12}"
}

/// Balance of the parentheses as written, ignoring everything else
fn parens_balanced(formula: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in formula.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

fn bindings() -> HashMap<String, f64> {
    HashMap::from([("x".to_string(), 1.5), ("y".to_string(), -2.0)])
}

proptest! {
    #[test]
    fn test_no_stage_panics(formula in formula_like()) {
        let _ = validate_formula(&formula);
        let _ = validate_syntax(&formula);
        let _ = extract_variables(&formula);
        let _ = evaluate_formula(&formula, &bindings());
    }

    #[test]
    fn test_validate_syntax_is_stable(formula in formula_like()) {
        prop_assert_eq!(validate_syntax(&formula), validate_syntax(&formula));
    }

    #[test]
    fn test_syntax_verdict_tracks_written_parentheses(formula in paren_soup()) {
        prop_assert_eq!(validate_syntax(&formula), parens_balanced(&formula), "{}", formula);
    }

    #[test]
    fn test_rpn_has_no_parentheses(formula in formula_like()) {
        if let Ok(tokens) = tokenize(&formula) {
            if let Ok(rpn) = to_postfix(&tokens) {
                prop_assert!(rpn
                    .iter()
                    .all(|t| !matches!(t, Token::LeftParen | Token::RightParen)));
            }
        }
    }

    #[test]
    fn test_well_formed_formulas_convert(formula in well_formed()) {
        let tokens = tokenize(&formula).unwrap();
        let rpn = to_postfix(&tokens).unwrap();
        prop_assert!(validate_syntax(&formula));
        // Conversion drops the parentheses and keeps everything else.
        let kept: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !matches!(t, Token::LeftParen | Token::RightParen))
            .collect();
        prop_assert_eq!(rpn.len(), kept.len());
    }

    #[test]
    fn test_well_formed_formulas_evaluate_or_report(formula in well_formed()) {
        let tokens = tokenize(&formula).unwrap();
        let rpn = to_postfix(&tokens).unwrap();
        // Only domain errors are possible once the shape is right.
        if let Err(err) = evaluate(&rpn, &bindings()) {
            prop_assert_eq!(err, formula_engine::EvalError::DivisionByZero);
        }
    }

    #[test]
    fn test_extracted_variables_are_unique(formula in formula_like()) {
        let names = extract_variables(&formula);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(names.len(), deduped.len());
    }
}
