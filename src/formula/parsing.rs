//! Shunting-yard conversion from infix to postfix (RPN)
//!
//! Operands go straight to the output. Operators wait on a stack until an operator
//! that binds looser arrives; `^` is right associative, everything else groups left.
//! Functions wait on the stack behind their `(` and are emitted as soon as the matching
//! `)` closes their argument.
//!
//! Example:
//!   tokens: [Function(sin), LeftParen, Variable(x), Operator(/), Number(2), RightParen]
//!   rpn:    [Variable(x), Number(2), Operator(/), Function(sin)]

use crate::formula::error::SyntaxError;
use crate::formula::token::{Associativity, Operator, Token};

/// Convert an infix token sequence to postfix order.
///
/// Fails only on mismatched parentheses. Arity problems such as `2 +` pass through and
/// surface when the RPN is evaluated.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, SyntaxError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Variable(_) => output.push(token.clone()),

            Token::Function(_) | Token::LeftParen => stack.push(token.clone()),

            Token::Operator(current) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    if !yields_to(*current, *top) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token.clone());
            }

            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(entry) => output.push(entry),
                        None => return Err(SyntaxError::MismatchedParentheses),
                    }
                }
                if let Some(Token::Function(_)) = stack.last() {
                    output.extend(stack.pop());
                }
            }
        }
    }

    while let Some(entry) = stack.pop() {
        if entry == Token::LeftParen {
            return Err(SyntaxError::MismatchedParentheses);
        }
        output.push(entry);
    }

    tracing::trace!(rpn_len = output.len(), "converted to postfix");
    Ok(output)
}

/// Whether `top` must be emitted before `current` is pushed.
fn yields_to(current: Operator, top: Operator) -> bool {
    match current.associativity() {
        Associativity::Left => current.precedence() <= top.precedence(),
        Associativity::Right => current.precedence() < top.precedence(),
    }
}
