//! # formula-engine
//!
//! A small expression engine for scalar formulas such as `2*x + sqrt(y)`.
//!
//! The engine is a straight pipeline: a tokenizer, a shunting-yard converter that
//! produces postfix (RPN) order, and a stack machine that evaluates the RPN against
//! caller-supplied variable bindings. Two independent validators sit beside it: a
//! structural pre-check with user-facing messages, and a grammar check that runs the
//! tokenizer and converter for their failure signal only.
//!
//! See the [formula] module for the full layout.

pub mod formula;

pub use formula::error::{EvalError, FormulaError, LexError, StructuralError, SyntaxError};
pub use formula::evaluation::evaluate;
pub use formula::lexing::tokenize;
pub use formula::parsing::to_postfix;
pub use formula::pipeline::evaluate_formula;
pub use formula::token::{Associativity, Function, Operator, Token};
pub use formula::validation::{validate_formula, validate_syntax, ValidationReport};
pub use formula::variables::extract_variables;
