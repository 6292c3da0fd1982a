//! Validators
//!
//!     Two independent passes guard the evaluator, and they report different classes of
//!     failure:
//!
//!     Structural:
//!         Regex and counting rules over the raw text (see [structural]). Produces
//!         user-facing messages such as "Formula contains consecutive operators".
//!
//!     Grammar:
//!         Runs the real tokenizer and converter and reports whether they fail (see
//!         [grammar]).
//!
//!     They overlap on parentheses and malformed numbers but are kept separate so each
//!     can be tested on its own. [bindings] validates the variable values callers supply.

pub mod bindings;
pub mod grammar;
pub mod structural;

pub use grammar::{check_syntax, validate_syntax};
pub use structural::Validator;

use crate::formula::config::ValidationLimits;
use crate::formula::error::StructuralError;
use serde::Serialize;

/// Run the structural validator with default limits.
pub fn validate_formula(formula: &str) -> Result<(), StructuralError> {
    Validator::new(ValidationLimits::default()).validate(formula)
}

/// Serializable `{valid, reason}` view of a structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }
}

impl From<Result<(), StructuralError>> for ValidationReport {
    fn from(result: Result<(), StructuralError>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(err) => Self {
                valid: false,
                reason: Some(err.to_string()),
            },
        }
    }
}
