//! Tokenizer for formulas
//!
//!     Tokenization happens in two layers. The logos scanner in [lexemes] produces raw,
//!     context-free lexemes. [tokenize] turns them into [Token]s and applies the rules
//!     that need context:
//!
//!     - A letter run that exactly matches the function set becomes a Function token,
//!       anything else becomes a Variable.
//!     - A `-` at the start of input, after an operator, or after `(` is unary. An
//!       implicit `Number(0)` is emitted before it, so `-x` is evaluated as `0 - x`. No
//!       other operator gets unary treatment.
//!
//! Unary Minus Grouping
//!
//!     Rewriting `3*-2` to `3*0-2` alone would evaluate to -2. The rewritten subtraction
//!     is therefore wrapped in implicit parentheses that close once its operand is
//!     complete: `3*-2` becomes `3*(0-2)`. The operand is one primary (number, variable,
//!     function call or parenthesised group) plus any `^` chain that follows it, so
//!     `-2^2` is `(0-2^2)`. A user `)` first closes every group opened at its own depth,
//!     even one whose operand is missing, so implicit parentheses always nest inside the
//!     user's and never pair with them: `-)^(2` still fails conversion.
//!
//!     Digits never extend an identifier: `x2` is the variable `x` followed by the number
//!     `2`. Callers see this, so it is kept as is.

pub mod lexemes;

use crate::formula::error::LexError;
use crate::formula::token::{Function, Operator, Token};
use lexemes::{Lexeme, LexemeError};
use logos::Logos;

/// Scan a formula into tokens, failing on the first unrecognised character or malformed
/// number.
pub fn tokenize(formula: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexeme::lexer(formula);
    let mut builder = TokenBuilder::default();

    while let Some(result) = lexer.next() {
        match result {
            Ok(lexeme) => builder.push(lexeme),
            Err(kind) => return Err(lex_error(kind, formula, lexer.span())),
        }
    }

    let tokens = builder.finish();
    tracing::trace!(token_count = tokens.len(), "tokenized formula");
    Ok(tokens)
}

/// Accumulates tokens and tracks open unary-minus groups.
#[derive(Debug, Default)]
struct TokenBuilder {
    tokens: Vec<Token>,
    /// Explicit parenthesis depth
    depth: usize,
    /// Depth at which each open unary-minus group was started, innermost last
    negations: Vec<usize>,
}

impl TokenBuilder {
    fn push(&mut self, lexeme: Lexeme) {
        if lexeme != Lexeme::Operator(Operator::Power) {
            self.close_negations();
        }

        match lexeme {
            Lexeme::Number(value) => self.tokens.push(Token::Number(value)),
            Lexeme::Word(name) => match Function::from_name(&name) {
                Some(function) => self.tokens.push(Token::Function(function)),
                None => self.tokens.push(Token::Variable(name)),
            },
            Lexeme::Operator(Operator::Subtract) if self.in_unary_position() => {
                self.open_negation()
            }
            Lexeme::Operator(op) => self.tokens.push(Token::Operator(op)),
            Lexeme::LeftParen => {
                self.depth += 1;
                self.tokens.push(Token::LeftParen);
            }
            Lexeme::RightParen => {
                self.force_close_negations();
                self.depth = self.depth.saturating_sub(1);
                self.tokens.push(Token::RightParen);
            }
        }
    }

    fn in_unary_position(&self) -> bool {
        self.tokens
            .last()
            .map_or(true, Token::opens_operand_position)
    }

    fn open_negation(&mut self) {
        self.tokens.extend([
            Token::LeftParen,
            Token::Number(0.0),
            Token::Operator(Operator::Subtract),
        ]);
        self.negations.push(self.depth);
    }

    /// Close the groups whose operand has just been completed at the current depth.
    fn close_negations(&mut self) {
        if !self.tokens.last().is_some_and(Token::ends_operand) {
            return;
        }
        self.force_close_negations();
    }

    /// Close the groups opened at the current depth whether or not their operand is
    /// complete.
    fn force_close_negations(&mut self) {
        while self.negations.last() == Some(&self.depth) {
            self.negations.pop();
            self.tokens.push(Token::RightParen);
        }
    }

    fn finish(mut self) -> Vec<Token> {
        for _ in self.negations.drain(..) {
            self.tokens.push(Token::RightParen);
        }
        self.tokens
    }
}

fn lex_error(kind: LexemeError, source: &str, span: logos::Span) -> LexError {
    let position = span.start;
    match kind {
        LexemeError::InvalidCharacter => LexError::InvalidCharacter {
            ch: source[position..].chars().next().unwrap_or('\u{FFFD}'),
            position,
        },
        LexemeError::MultipleDecimalPoints => LexError::MultipleDecimalPoints {
            literal: source[span].to_string(),
            position,
        },
        LexemeError::MalformedNumber => LexError::MalformedNumber {
            literal: source[span].to_string(),
            position,
        },
    }
}
