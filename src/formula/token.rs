//! Token types and the static lookup tables shared by every stage.
//!
//!     A formula is scanned into a flat sequence of [Token]s. The same type is used for
//!     the infix sequence produced by the tokenizer and for the postfix sequence produced
//!     by the shunting-yard converter; only the order differs.
//!
//!     Operators and functions are closed enums rather than strings, so a token that
//!     names an unknown operator or function cannot be constructed. The precedence and
//!     associativity table is a `const` array: there is nothing to initialise and nothing
//!     to mutate.

use serde::Serialize;
use std::fmt;

/// Grouping direction for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    Left,
    Right,
}

/// Binary operators. Unary minus is rewritten to `0 - x` by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "^")]
    Power,
}

/// One row of the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub operator: Operator,
    pub symbol: char,
    pub precedence: u8,
    pub associativity: Associativity,
}

/// Symbol, precedence and associativity for every operator.
pub const OPERATOR_TABLE: [OperatorSpec; 5] = [
    OperatorSpec {
        operator: Operator::Add,
        symbol: '+',
        precedence: 2,
        associativity: Associativity::Left,
    },
    OperatorSpec {
        operator: Operator::Subtract,
        symbol: '-',
        precedence: 2,
        associativity: Associativity::Left,
    },
    OperatorSpec {
        operator: Operator::Multiply,
        symbol: '*',
        precedence: 3,
        associativity: Associativity::Left,
    },
    OperatorSpec {
        operator: Operator::Divide,
        symbol: '/',
        precedence: 3,
        associativity: Associativity::Left,
    },
    OperatorSpec {
        operator: Operator::Power,
        symbol: '^',
        precedence: 4,
        associativity: Associativity::Right,
    },
];

impl Operator {
    /// Look up an operator by its symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        OPERATOR_TABLE
            .iter()
            .find(|spec| spec.symbol == symbol)
            .map(|spec| spec.operator)
    }

    pub fn spec(self) -> &'static OperatorSpec {
        match self {
            Operator::Add => &OPERATOR_TABLE[0],
            Operator::Subtract => &OPERATOR_TABLE[1],
            Operator::Multiply => &OPERATOR_TABLE[2],
            Operator::Divide => &OPERATOR_TABLE[3],
            Operator::Power => &OPERATOR_TABLE[4],
        }
    }

    pub fn symbol(self) -> char {
        self.spec().symbol
    }

    pub fn precedence(self) -> u8 {
        self.spec().precedence
    }

    pub fn associativity(self) -> Associativity {
        self.spec().associativity
    }

    /// Apply the operator with IEEE double semantics.
    ///
    /// Division by zero is not checked here; the evaluator rejects it before calling.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
            Operator::Power => a.powf(b),
        }
    }
}

/// Recognised unary functions. Any other letter run is a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Abs,
}

/// Every function name, in declaration order.
pub const FUNCTION_NAMES: [&str; 6] = ["sin", "cos", "tan", "sqrt", "log", "abs"];

impl Function {
    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "sqrt" => Some(Function::Sqrt),
            "log" => Some(Function::Log),
            "abs" => Some(Function::Abs),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Abs => "abs",
        }
    }

    pub fn is_function_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

/// A single lexical unit of a formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Token {
    Number(f64),
    Variable(String),
    Operator(Operator),
    Function(Function),
    LeftParen,
    RightParen,
}

impl Token {
    /// Check if a `-` following this token is in unary position
    pub fn opens_operand_position(&self) -> bool {
        matches!(self, Token::Operator(_) | Token::LeftParen)
    }

    /// Check if this token can be the last token of an operand
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::RightParen
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Variable(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Function(func) => write!(f, "{}", func),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}
