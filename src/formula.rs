//! Main module for formula engine functionality
//!
//! Data flow:
//!
//!     raw string -> lexing::tokenize -> Vec<Token>
//!         -> variables::extract_variables (side query)
//!         -> parsing::to_postfix -> RPN Vec<Token> -> evaluation::evaluate -> f64
//!
//!     validation::grammar runs tokenize + to_postfix for their error signal only.
//!     validation::structural is an independent regex-based pre-check.
//!
//! Every stage is pure: it allocates its own buffers, reads the static operator and
//! function tables, and shares nothing across calls.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod formatting;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod session;
pub mod token;
pub mod validation;
pub mod variables;
