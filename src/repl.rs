//! Line evaluation for the interactive calculator.
//!
//! A line is three whitespace-separated tokens: a left operand, an operator
//! symbol, and a right operand. The literal line `exit` ends the session.
//! Everything here is pure; the binary owns the terminal loop.

use std::str::FromStr;

use thiserror::Error;

use crate::rational::{Rational, RationalError};

/// The binary operators the calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Multiply,
    Divide,
    Add,
    Subtract,
    Modulo,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplError {
    /// The operator token was not one of `*`, `/`, `+`, `-`, `%`.
    #[error("invalid operator '{0}'")]
    InvalidOperator(String),
    #[error(transparent)]
    Rational(#[from] RationalError),
}

impl FromStr for Op {
    type Err = ReplError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" => Ok(Op::Multiply),
            "/" => Ok(Op::Divide),
            "+" => Ok(Op::Add),
            "-" => Ok(Op::Subtract),
            "%" => Ok(Op::Modulo),
            _ => Err(ReplError::InvalidOperator(s.to_owned())),
        }
    }
}

impl Op {
    /// Applies the operator to two operands.
    pub fn apply(self, left: Rational, right: Rational) -> Result<Rational, RationalError> {
        match self {
            Op::Multiply => Ok(left * right),
            Op::Divide => left.checked_div(right),
            Op::Add => Ok(left + right),
            Op::Subtract => Ok(left - right),
            Op::Modulo => left.checked_rem(right),
        }
    }
}

/// What one input line produced: a computed value, or a request to quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Value(Rational),
    Exit,
}

/// Evaluates one input line.
///
/// Missing tokens read as empty strings and surface the usual parse errors;
/// tokens past the third are ignored. Errors never end the session, only
/// `exit` (matched exactly) does.
pub fn eval_line(line: &str) -> Result<Reply, ReplError> {
    if line == "exit" {
        return Ok(Reply::Exit);
    }

    let mut tokens = line.split_whitespace();
    let left: Rational = tokens.next().unwrap_or("").parse()?;
    let op: Op = tokens.next().unwrap_or("").parse()?;
    let right: Rational = tokens.next().unwrap_or("").parse()?;

    Ok(Reply::Value(op.apply(left, right)?))
}
