//! Exact rational-number arithmetic with a calculator-style text syntax.
//!
//! The heart of the crate is [`Rational`], an i64 fraction kept in lowest
//! terms with a positive denominator. It parses from text (`"2&3/4"`,
//! `"11/4"`, `"23"`), converts to and from floats, supports the four
//! arithmetic operations plus modulo, and renders back as simple or mixed
//! text. The [`repl`] module and the `fracalc` binary wrap it in a small
//! interactive calculator.

pub mod parsing;
pub mod rational;
pub mod repl;

pub use rational::{Rational, RationalError};
