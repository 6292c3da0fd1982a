//! Raw lexemes produced by the logos scanner
//!
//! This is the context-free layer: logos cuts the source into maximal runs and knows
//! nothing about what came before. Context-dependent decisions (function vs. variable,
//! unary minus) are made by [tokenize](super::tokenize) when lexemes become tokens.

use crate::formula::token::Operator;
use logos::Logos;

/// Failure kinds reported by the scanner. Positions are attached by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LexemeError {
    #[default]
    InvalidCharacter,
    MultipleDecimalPoints,
    MalformedNumber,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexemeError)]
#[logos(skip r"\s+")]
pub enum Lexeme {
    /// A maximal run of digits and dots, e.g. `12`, `3.5`, `.5`
    #[regex(r"[0-9.]+", lex_number)]
    Number(f64),

    /// A maximal run of ASCII letters. Digits never extend it.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Word(String),

    #[token("+", |_| Operator::Add)]
    #[token("-", |_| Operator::Subtract)]
    #[token("*", |_| Operator::Multiply)]
    #[token("/", |_| Operator::Divide)]
    #[token("^", |_| Operator::Power)]
    Operator(Operator),

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,
}

fn lex_number(lex: &mut logos::Lexer<Lexeme>) -> Result<f64, LexemeError> {
    let slice = lex.slice();
    if slice.matches('.').count() > 1 {
        return Err(LexemeError::MultipleDecimalPoints);
    }
    slice
        .parse::<f64>()
        .map_err(|_| LexemeError::MalformedNumber)
}
