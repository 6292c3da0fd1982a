//! RPN stack machine
//!
//! Evaluates a postfix sequence left to right over a stack of `f64`. The variable map is
//! only read, never retained past the call.

use crate::formula::error::EvalError;
use crate::formula::token::{Function, Operator, Token};
use std::collections::HashMap;

/// Evaluate a postfix token sequence against the given bindings.
///
/// Success requires exactly one value left on the stack once the sequence is consumed.
pub fn evaluate(rpn: &[Token], variables: &HashMap<String, f64>) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(rpn.len());

    for token in rpn {
        match token {
            Token::Number(value) => stack.push(*value),

            Token::Variable(name) => {
                let value = variables
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                stack.push(value);
            }

            Token::Operator(op) => {
                let (b, a) = match (stack.pop(), stack.pop()) {
                    (Some(b), Some(a)) => (b, a),
                    _ => return Err(EvalError::InvalidExpression),
                };
                stack.push(apply_operator(*op, a, b)?);
            }

            Token::Function(function) => {
                let arg = stack.pop().ok_or(EvalError::InvalidFunctionCall)?;
                stack.push(apply_function(*function, arg)?);
            }

            // A correct conversion never leaves parentheses in RPN.
            Token::LeftParen | Token::RightParen => return Err(EvalError::InvalidExpression),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}

fn apply_operator(op: Operator, a: f64, b: f64) -> Result<f64, EvalError> {
    if op == Operator::Divide && b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(op.apply(a, b))
}

fn apply_function(function: Function, arg: f64) -> Result<f64, EvalError> {
    match function {
        Function::Sin => Ok(arg.sin()),
        Function::Cos => Ok(arg.cos()),
        Function::Tan => Ok(arg.tan()),
        Function::Abs => Ok(arg.abs()),
        Function::Sqrt if arg < 0.0 => Err(EvalError::NegativeSquareRoot),
        Function::Sqrt => Ok(arg.sqrt()),
        Function::Log if arg <= 0.0 => Err(EvalError::NonPositiveLogarithm),
        Function::Log => Ok(arg.ln()),
    }
}
