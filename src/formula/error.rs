//! Error taxonomy for every stage of the engine.
//!
//! Messages are user facing and shown verbatim by callers, so each variant renders a
//! specific reason rather than a code.

use thiserror::Error;

/// Scanning failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("invalid number format '{literal}' at position {position}: multiple decimal points")]
    MultipleDecimalPoints { literal: String, position: usize },

    #[error("malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },
}

/// Conversion (infix to postfix) failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("mismatched parentheses")]
    MismatchedParentheses,
}

/// Stack machine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("invalid expression")]
    InvalidExpression,

    #[error("invalid function call")]
    InvalidFunctionCall,

    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of negative number")]
    NegativeSquareRoot,

    #[error("logarithm of non-positive number")]
    NonPositiveLogarithm,
}

/// Failures of the standalone structural pre-validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("Formula must be a non-empty string")]
    Missing,

    #[error("Formula cannot be empty")]
    Empty,

    #[error("Formula exceeds maximum length of {max} characters")]
    TooLong { max: usize },

    #[error("Formula contains invalid characters")]
    InvalidCharacters,

    #[error("Formula contains consecutive operators")]
    ConsecutiveOperators,

    #[error("Unmatched closing parenthesis")]
    UnmatchedClosingParenthesis,

    #[error("Unmatched opening parenthesis")]
    UnmatchedOpeningParenthesis,

    #[error("Empty parentheses are not allowed")]
    EmptyParentheses,

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Formula cannot end with an operator")]
    TrailingOperator,

    #[error("Formula cannot start with *, /, or ^")]
    LeadingOperator,

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),
}

/// Failures of caller-supplied variable bindings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    #[error("Variable name must be a non-empty string")]
    EmptyName,

    #[error("Variable name exceeds maximum length of {max} characters")]
    NameTooLong { max: usize },

    #[error("Variable name must start with a letter and contain only letters, numbers, and underscores")]
    MalformedName,

    #[error("Variable name cannot be a reserved function name")]
    ReservedName,

    #[error("Value must be a valid number")]
    NotANumber,

    #[error("Value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("Too many variables (maximum {max})")]
    TooMany { max: usize },

    #[error("Invalid variable name \"{name}\": {source}")]
    InvalidName {
        name: String,
        source: Box<BindingError>,
    },

    #[error("Invalid value for variable \"{name}\": {source}")]
    InvalidValue {
        name: String,
        source: Box<BindingError>,
    },

    #[error("Variable \"{0}\" is not referenced by the formula")]
    UnknownVariable(String),
}

/// Any failure of the tokenize -> convert -> evaluate pipeline.
///
/// The display form carries the evaluation prefix callers show to users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("Evaluation error: {0}")]
    Lex(#[from] LexError),

    #[error("Evaluation error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl FormulaError {
    /// The stage-level reason without the evaluation prefix.
    pub fn reason(&self) -> String {
        match self {
            FormulaError::Lex(e) => e.to_string(),
            FormulaError::Syntax(e) => e.to_string(),
            FormulaError::Eval(e) => e.to_string(),
        }
    }
}
