//! Parsing fractions from the calculator's ASCII syntax.
//!
//! Three forms are accepted, tried in this order: a mixed fraction like
//! `2&3/4`, a simple (possibly improper) fraction like `11/4`, and a bare
//! integer like `23`. Each form must consume the whole input; separators
//! carry no surrounding whitespace.

use nom::character::complete::{char, i64};
use nom::combinator::all_consuming;
use nom::sequence::{preceded, separated_pair, tuple};
use nom::IResult;

use crate::rational::{Rational, RationalError};

/// Parses the mixed form `W&N/D` into its three raw parts.
pub fn mixed(input: &str) -> IResult<&str, (i64, i64, i64)> {
    tuple((i64, preceded(char('&'), i64), preceded(char('/'), i64)))(input)
}

/// Parses the simple form `N/D` into numerator and denominator.
pub fn simple(input: &str) -> IResult<&str, (i64, i64)> {
    separated_pair(i64, char('/'), i64)(input)
}

/// Parses a fraction in any accepted form, reduced to lowest terms.
///
/// Mixed input requires a non-negative fractional numerator and a positive
/// denominator; the whole part's sign is applied to the combined value, so
/// `-2&3/4` reads as -11/4. Simple input requires a positive denominator.
pub fn fraction(text: &str) -> Result<Rational, RationalError> {
    if text.is_empty() {
        return Err(RationalError::EmptyInput);
    }

    if let Ok((_, (whole, numerator, denominator))) = all_consuming(mixed)(text) {
        if numerator < 0 {
            return Err(RationalError::InvalidNumerator(text.to_owned()));
        }
        if denominator <= 0 {
            return Err(RationalError::InvalidDenominator(text.to_owned()));
        }
        let sign = if whole < 0 { -1 } else { 1 };
        return Rational::new(sign * (whole.abs() * denominator + numerator), denominator);
    }

    if let Ok((_, (numerator, denominator))) = all_consuming(simple)(text) {
        if denominator <= 0 {
            return Err(RationalError::InvalidDenominator(text.to_owned()));
        }
        return Rational::new(numerator, denominator);
    }

    if let Ok((_, numerator)) = all_consuming(i64::<&str, nom::error::Error<&str>>)(text) {
        return Rational::new(numerator, 1);
    }

    Err(RationalError::MalformedFraction(text.to_owned()))
}
