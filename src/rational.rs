//! An exact rational number type for calculator-style arithmetic: fractions are
//! kept in lowest terms with the sign carried by the numerator, and render as
//! either simple ("11/4") or mixed ("2&3/4") text.

use num_traits::{FromPrimitive, Num, One, Signed, Zero};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};
use thiserror::Error;

/// The scale used when converting a float's fractional digits to a fraction:
/// the decimal value is kept to nine fractional digits and reduced from there.
const PRECISION: i64 = 1_000_000_000;

/// An exact fraction: a numerator/denominator pair in lowest terms.
///
/// Two invariants hold for every value that can be observed:
/// the denominator is positive (the sign lives in the numerator), and
/// gcd(|numerator|, denominator) is 1, with zero always stored as 0/1.
/// Arithmetic is performed in `i64`; operands near the `i64` bounds can
/// overflow, which is a known limitation of the bounded-width representation.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RationalError {
    /// The input string was empty.
    #[error("empty fraction string")]
    EmptyInput,
    /// The input did not match any of the accepted fraction forms.
    #[error("invalid fraction '{0}'")]
    MalformedFraction(String),
    /// A fraction was constructed with a zero or negative denominator.
    #[error("invalid denominator value '{0}'")]
    InvalidDenominatorValue(i64),
    /// A mixed-form input carried a negative fractional numerator.
    #[error("invalid numerator '{0}'")]
    InvalidNumerator(String),
    /// A parsed denominator was zero or negative.
    #[error("invalid denominator '{0}'")]
    InvalidDenominator(String),
    /// A modulo divisor was not a positive whole number.
    #[error("invalid modulo divisor '{0}'")]
    InvalidModuloDivisor(String),
    #[error("division by zero")]
    DivisionByZero,
}

impl Rational {
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a fraction from a numerator and denominator, reduced to lowest
    /// terms. A zero numerator yields canonical zero regardless of the
    /// denominator; otherwise the denominator must be positive.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, RationalError> {
        if numerator == 0 {
            Ok(Self::ZERO)
        } else if denominator <= 0 {
            Err(RationalError::InvalidDenominatorValue(denominator))
        } else {
            Ok(Self::reduced(numerator, denominator))
        }
    }

    /// Creates the whole number `numerator`/1.
    pub const fn from_integer(numerator: i64) -> Self {
        Self {
            numerator,
            denominator: 1,
        }
    }

    /// Reduces a pair with a known-positive denominator to lowest terms.
    fn reduced(numerator: i64, denominator: i64) -> Self {
        if numerator == 0 {
            return Self::ZERO;
        }
        let g = Self::gcd(numerator.abs(), denominator);
        if g > 1 {
            Self {
                numerator: numerator / g,
                denominator: denominator / g,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    pub const fn gcd(p: i64, q: i64) -> i64 {
        let mut p = p;
        let mut q = q;
        while q != 0 {
            let r = p % q;
            p = q;
            q = r;
        }

        p
    }

    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Whether the magnitude exceeds one, i.e. the value carries a whole part
    /// when written in mixed form.
    pub const fn is_mixed(&self) -> bool {
        self.numerator.abs() > self.denominator
    }

    /// Converts a finite float to the fraction matching its decimal expansion,
    /// kept to nine fractional digits. `2.75` becomes 11/4, `0.2` becomes 1/5.
    /// The result is the decimal reading of the value, not the float's exact
    /// binary expansion. Behavior for NaN or infinite input is unspecified.
    pub fn from_f64(value: f64) -> Self {
        let integral = value.floor();
        let fractional = value - integral;

        if fractional != 0.0 {
            let frac_scaled = (fractional * PRECISION as f64).round() as i64;
            let g = Self::gcd(frac_scaled, PRECISION);
            let denominator = PRECISION / g;
            Self::reduced(integral as i64 * denominator + frac_scaled / g, denominator)
        } else if integral != 0.0 {
            Self::from_integer(integral as i64)
        } else {
            Self::ZERO
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Renders the fraction as text. With `as_mixed` set, values with a whole
    /// part print as `whole&remainder/denominator`; otherwise, and for proper
    /// fractions, as `numerator/denominator`. Whole numbers print bare.
    pub fn format(&self, as_mixed: bool) -> String {
        if self.numerator == 0 {
            "0".to_string()
        } else if self.denominator == 0 {
            // Unconstructible, but a denominator of zero must never print as a number.
            "undefined".to_string()
        } else if self.denominator == 1 {
            self.numerator.to_string()
        } else if as_mixed && self.is_mixed() {
            let whole = self.numerator / self.denominator;
            let remainder = self.numerator.abs() % self.denominator;
            format!("{whole}&{remainder}/{}", self.denominator)
        } else {
            format!("{}/{}", self.numerator, self.denominator)
        }
    }

    /// Division that reports a zero divisor instead of panicking.
    ///
    /// The divisor's sign is folded into the result's numerator so that the
    /// denominator stays positive.
    pub fn checked_div(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.numerator == 0 {
            Err(RationalError::DivisionByZero)
        } else if self.numerator == 0 {
            Ok(Self::ZERO)
        } else {
            let sign = rhs.numerator.signum();
            Ok(Self::reduced(
                self.numerator * rhs.denominator * sign,
                self.denominator * rhs.numerator.abs(),
            ))
        }
    }

    /// Modulo against a positive whole-number divisor, via
    /// a mod b = a - b * floor(a / b).
    ///
    /// The quotient's floor is taken in `f64`, so operands near the `i64`
    /// bounds can floor to a neighboring integer.
    pub fn checked_rem(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.numerator <= 0 || rhs.denominator != 1 {
            return Err(RationalError::InvalidModuloDivisor(rhs.to_string()));
        }

        let quotient = self.checked_div(rhs)?;
        let whole = Self::from_f64(quotient.to_f64().floor());
        Ok(self - rhs * whole)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Rational {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parsing::fraction(s)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(n as i64)
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.numerator == 0 {
            rhs
        } else if rhs.numerator == 0 {
            self
        } else {
            Self::reduced(
                self.numerator * rhs.denominator + rhs.numerator * self.denominator,
                self.denominator * rhs.denominator,
            )
        }
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.numerator == 0 {
            -rhs
        } else if rhs.numerator == 0 {
            self
        } else {
            Self::reduced(
                self.numerator * rhs.denominator - rhs.numerator * self.denominator,
                self.denominator * rhs.denominator,
            )
        }
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::reduced(
            self.numerator * rhs.numerator,
            self.denominator * rhs.denominator,
        )
    }
}

impl MulAssign for Rational {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Rational {
    type Output = Self;

    /// Note: this panics on a zero divisor, like integer division. Use
    /// [`Rational::checked_div`] to handle that case.
    fn div(self, rhs: Self) -> Self::Output {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(e) => panic!("{e}"),
        }
    }
}

impl DivAssign for Rational {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Rem for Rational {
    type Output = Self;

    /// Note: this panics unless the divisor is a positive whole number. Use
    /// [`Rational::checked_rem`] to handle that case.
    fn rem(self, rhs: Self) -> Self::Output {
        match self.checked_rem(rhs) {
            Ok(remainder) => remainder,
            Err(e) => panic!("{e}"),
        }
    }
}

impl RemAssign for Rational {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cross-multiplication is exact in i128; both denominators are positive.
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }
}

impl Num for Rational {
    type FromStrRadixErr = <i64 as Num>::FromStrRadixErr;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        i64::from_str_radix(str, radix).map(Self::from_integer)
    }
}

impl Signed for Rational {
    fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator,
        }
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::ZERO
        } else {
            *self - *other
        }
    }

    fn signum(&self) -> Self {
        Self::from_integer(self.numerator.signum())
    }

    fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    fn is_negative(&self) -> bool {
        self.numerator < 0
    }
}

impl FromPrimitive for Rational {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from_integer(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        i64::try_from(n).ok().map(Self::from_integer)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ratio!({}/{})", self.numerator, self.denominator)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(true))
    }
}

/// Builds a [`Rational`] from literal parts, panicking on an invalid
/// denominator. Intended for constants and tests; parse user input with
/// [`Rational::from_str`] instead.
#[macro_export]
macro_rules! ratio {
    ($num:literal / $denom:literal) => {
        match $crate::rational::Rational::new($num, $denom) {
            Ok(value) => value,
            Err(_) => panic!(concat!(
                "invalid fraction literal ",
                stringify!($num),
                "/",
                stringify!($denom)
            )),
        }
    };
    ($num:expr) => {
        $crate::rational::Rational::from_integer($num as i64)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio;

    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_macro() {
        assert_eq!(ratio!(2 / 4), ratio!(1 / 2));
        assert_eq!(ratio!(-6 / 4), ratio!(-3 / 2));
        assert_eq!(ratio!(3), Rational::from_integer(3));
        assert_eq!(ratio!(0), Rational::ZERO);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(Rational::gcd(4, 24), 4);
        assert_eq!(Rational::gcd(25, 4), 1);
        assert_eq!(Rational::gcd(25, 10), 5);
        assert_eq!(Rational::gcd(64, 8), 8);
        assert_eq!(Rational::gcd(7, 0), 7);
    }

    #[test]
    fn test_new_reduces() {
        let r = Rational::new(4, 6).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (2, 3));

        let r = Rational::new(-4, 6).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (-2, 3));
    }

    #[test]
    fn test_new_zero_is_canonical() {
        let r = Rational::new(0, 17).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (0, 1));
        // A zero numerator wins over a bad denominator.
        assert_eq!(Rational::new(0, -5).unwrap(), Rational::ZERO);
    }

    #[test]
    fn test_new_rejects_bad_denominator() {
        assert_eq!(
            Rational::new(1, 0),
            Err(RationalError::InvalidDenominatorValue(0))
        );
        assert_eq!(
            Rational::new(2, -4),
            Err(RationalError::InvalidDenominatorValue(-4))
        );
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Rational::default(), Rational::ZERO);
        assert_eq!(Rational::default().denominator(), 1);
    }

    #[test]
    fn test_multiplication() {
        let result = ratio!(1 / 2) * ratio!(3 / 4);
        assert_eq!(result.format(true), "3/8");
    }

    #[test]
    fn test_division() {
        let result = ratio!(1 / 2) / ratio!(3 / 4);
        assert_eq!(result.format(true), "2/3");
    }

    #[test]
    fn test_addition() {
        let result = ratio!(1 / 2) + ratio!(3 / 4);
        assert_eq!(result.format(true), "1&1/4");
    }

    #[test]
    fn test_subtraction() {
        let result = ratio!(1 / 2) - ratio!(3 / 4);
        assert_eq!(result.format(true), "-1/4");
    }

    #[test]
    fn test_modulo() {
        let result = ratio!(28 / 11) % ratio!(2);
        assert_eq!(result.format(true), "6/11");
    }

    #[test]
    fn test_modulo_negative_dividend() {
        assert_eq!(ratio!(-1 / 2) % ratio!(2), ratio!(3 / 2));
        assert_eq!(ratio!(-7 / 2) % ratio!(2), ratio!(1 / 2));
    }

    #[test]
    fn test_modulo_rejects_fractional_divisor() {
        assert_eq!(
            ratio!(1 / 2).checked_rem(ratio!(3 / 2)),
            Err(RationalError::InvalidModuloDivisor("1&1/2".to_string()))
        );
        assert_eq!(
            ratio!(1 / 2).checked_rem(ratio!(-2)),
            Err(RationalError::InvalidModuloDivisor("-2".to_string()))
        );
        assert_eq!(
            ratio!(1 / 2).checked_rem(Rational::ZERO),
            Err(RationalError::InvalidModuloDivisor("0".to_string()))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            ratio!(5).checked_div(Rational::ZERO),
            Err(RationalError::DivisionByZero)
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_division_by_zero_panics() {
        let _ = ratio!(5) / Rational::ZERO;
    }

    #[test]
    fn test_division_sign_stays_in_numerator() {
        let result = ratio!(1 / 2) / ratio!(-3 / 4);
        assert_eq!((result.numerator(), result.denominator()), (-2, 3));

        let result = ratio!(-1 / 2) / ratio!(-3 / 4);
        assert_eq!((result.numerator(), result.denominator()), (2, 3));
    }

    #[test]
    fn test_zero_dividend() {
        assert_eq!(Rational::ZERO.checked_div(ratio!(3 / 4)), Ok(Rational::ZERO));
    }

    #[test]
    fn test_negation() {
        assert_eq!(-ratio!(3 / 8), ratio!(-3 / 8));
        assert_eq!(Rational::ZERO - ratio!(3 / 4), ratio!(-3 / 4));
        assert_eq!(ratio!(3 / 4) - Rational::ZERO, ratio!(3 / 4));
    }

    #[test]
    fn test_format_simple_and_mixed() {
        assert_eq!(ratio!(11 / 4).format(true), "2&3/4");
        assert_eq!(ratio!(11 / 4).format(false), "11/4");
        assert_eq!(ratio!(-11 / 4).format(true), "-2&3/4");
        assert_eq!(ratio!(-11 / 4).format(false), "-11/4");
        assert_eq!(ratio!(3 / 8).format(true), "3/8");
        assert_eq!(ratio!(5).format(true), "5");
        assert_eq!(ratio!(-5).format(false), "-5");
        assert_eq!(Rational::ZERO.format(true), "0");
    }

    #[test]
    fn test_display_defaults_to_mixed() {
        assert_eq!(format!("{}", ratio!(5 / 4)), "1&1/4");
        assert_eq!(format!("{}", ratio!(1 / 2)), "1/2");
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", ratio!(-3 / 8)), "ratio!(-3/8)");
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Rational::from_f64(0.5), ratio!(1 / 2));
        assert_eq!(Rational::from_f64(0.75), ratio!(3 / 4));
        assert_eq!(Rational::from_f64(0.2), ratio!(1 / 5));
        assert_eq!(Rational::from_f64(-2.5), ratio!(-5 / 2));
        assert_eq!(Rational::from_f64(3.0), ratio!(3));
        assert_eq!(Rational::from_f64(-4.0), ratio!(-4));
        assert_eq!(Rational::from_f64(0.0), Rational::ZERO);
    }

    #[test]
    fn test_from_f64_keeps_nine_digits() {
        // 1/3 is not a decimal fraction; the conversion reads nine digits of it.
        assert_eq!(
            Rational::from_f64(1.0 / 3.0),
            Rational::new(333_333_333, 1_000_000_000).unwrap()
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(ratio!(1 / 2).to_f64(), 0.5);
        assert_eq!(ratio!(-11 / 4).to_f64(), -2.75);
        assert_abs_diff_eq!(Rational::from_f64(0.128).to_f64(), 0.128, epsilon = 1e-9);
        assert_abs_diff_eq!(ratio!(1 / 3).to_f64(), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ordering() {
        assert!(ratio!(1 / 3) < ratio!(1 / 2));
        assert!(ratio!(-1 / 2) < ratio!(1 / 3));
        assert!(ratio!(2) > ratio!(3 / 2));
        assert_eq!(ratio!(2 / 4).cmp(&ratio!(1 / 2)), Ordering::Equal);
    }

    #[test]
    fn test_signed() {
        assert_eq!(ratio!(-3 / 8).abs(), ratio!(3 / 8));
        assert_eq!(ratio!(-3 / 8).signum(), ratio!(-1));
        assert_eq!(Rational::ZERO.signum(), Rational::ZERO);
        assert!(ratio!(-3 / 8).is_negative());
        assert!(ratio!(3 / 8).is_positive());
    }

    #[test]
    fn test_num_traits_construction() {
        assert_eq!(Rational::from_str_radix("ff", 16).unwrap(), ratio!(255));
        assert_eq!(Rational::from_u64(7), Some(ratio!(7)));
        assert_eq!(Rational::from_u64(u64::MAX), None);
        assert!(Rational::zero().is_zero());
        assert!(Rational::one().is_one());
        assert!(!ratio!(1 / 2).is_one());
    }

    prop_compose! {
        fn rationals()(numerator in -1000i64..1000, denominator in 1i64..1000) -> Rational {
            Rational::new(numerator, denominator).unwrap()
        }
    }

    fn assert_normalized(r: Rational) {
        assert!(r.denominator() > 0, "{r:?}");
        assert_eq!(Rational::gcd(r.numerator().abs(), r.denominator()), 1, "{r:?}");
        if r.numerator() == 0 {
            assert_eq!(r.denominator(), 1, "{r:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_construction_normalizes(r in rationals()) {
            assert_normalized(r);
        }

        #[test]
        fn prop_operations_normalize(a in rationals(), b in rationals()) {
            assert_normalized(a * b);
            assert_normalized(a + b);
            assert_normalized(a - b);
            if !b.is_zero() {
                assert_normalized(a.checked_div(b).unwrap());
            }
        }

        #[test]
        fn prop_roundtrip_simple_form(r in rationals()) {
            let text = r.format(false);
            prop_assert_eq!(text.parse::<Rational>().unwrap(), r);
        }

        #[test]
        fn prop_mul_commutes(a in rationals(), b in rationals()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn prop_add_commutes(a in rationals(), b in rationals()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn prop_identities(a in rationals()) {
            prop_assert_eq!(a + Rational::ZERO, a);
            prop_assert_eq!(a * Rational::ONE, a);
            prop_assert_eq!(a.checked_div(Rational::ONE).unwrap(), a);
        }

        #[test]
        fn prop_self_difference_is_canonical_zero(a in rationals()) {
            let difference = a - a;
            prop_assert_eq!(difference, Rational::ZERO);
            prop_assert_eq!(difference.denominator(), 1);
        }

        #[test]
        fn prop_modulo_range(a in rationals(), b in 1i64..100) {
            let b = Rational::from_integer(b);
            let r = a.checked_rem(b).unwrap();
            prop_assert!(0.0 <= r.to_f64());
            prop_assert!(r.to_f64() < b.to_f64());
        }
    }
}
