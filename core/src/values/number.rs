//! Exact rational numbers.
//!
//! Every number in an expression is an [`ExactNumber`]: a sign plus an
//! arbitrary-precision numerator and denominator, always kept in lowest terms.
//! Arithmetic never rounds, so `0.1 + 0.2 == 0.3` holds.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Digits after the decimal point used when converting to `f64`.
pub const DEFAULT_PRECISION: u32 = 20;

/// Largest result, in bits, that exponentiation is allowed to produce.
pub const MAX_POWER_BITS: u64 = 1 << 22;

/// Most decimal places [`ExactNumber::round`] and [`ExactNumber::to_fixed`]
/// will produce.
pub const MAX_DIGITS: u32 = 10_000;

/// Largest magnitude accepted for the exponent of a decimal literal (`1e5000`).
pub const MAX_DECIMAL_EXPONENT: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("{message}")]
    NotImplemented { message: String },
    #[error("{message}")]
    Conversion { message: String },
    #[error("NaN is not a valid number.")]
    NotANumber,
    #[error("Infinity is not a valid number.")]
    Infinite,
    #[error("Unsupported Rational string: {text}")]
    InvalidLiteral { text: String },
    #[error("Cannot use {digits} decimal places, the limit is {max}", max = MAX_DIGITS)]
    TooManyDigits { digits: u32 },
}

/// An exact rational number.
///
/// Invariants: the denominator is never zero, `gcd(numerator, denominator)`
/// is one, and zero is never negative. Two equal values therefore always have
/// identical fields, which is what the derived `Eq` and `Hash` rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactNumber {
    negative: bool,
    numerator: BigUint,
    denominator: BigUint,
}

impl ExactNumber {
    /// Builds `numerator / denominator`, reducing and normalizing the sign.
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, NumberError> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
        Ok(Self::reduced(
            negative,
            numerator.magnitude().clone(),
            denominator.magnitude().clone(),
        ))
    }

    /// Builds `sign * numerator / denominator`. Only the sign of `sign` matters.
    pub fn from_parts(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
        sign: i8,
    ) -> Result<Self, NumberError> {
        let value = Self::new(numerator, denominator)?;
        Ok(if sign < 0 { -value } else { value })
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        let value = value.into();
        Self::reduced(
            value.sign() == Sign::Minus,
            value.magnitude().clone(),
            BigUint::one(),
        )
    }

    fn reduced(negative: bool, numerator: BigUint, denominator: BigUint) -> Self {
        let gcd = numerator.gcd(&denominator);
        let (numerator, denominator) = if gcd.is_one() {
            (numerator, denominator)
        } else {
            (numerator / &gcd, denominator / &gcd)
        };
        Self {
            negative: negative && !numerator.is_zero(),
            numerator,
            denominator,
        }
    }

    fn signed_numerator(&self) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.numerator.clone())
    }

    /// `-1` for negative values, `1` otherwise (zero included).
    pub fn signum(&self) -> i8 {
        if self.negative { -1 } else { 1 }
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// The value as an integer, if it has no fractional part.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.signed_numerator())
    }

    pub fn negated(&self) -> Self {
        -self.clone()
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn plus(&self, other: &Self) -> Self {
        let numerator = self.signed_numerator() * BigInt::from(other.denominator.clone())
            + other.signed_numerator() * BigInt::from(self.denominator.clone());
        let denominator = &self.denominator * &other.denominator;
        Self::reduced(
            numerator.sign() == Sign::Minus,
            numerator.magnitude().clone(),
            denominator,
        )
    }

    pub fn minus(&self, other: &Self) -> Self {
        self.plus(&other.negated())
    }

    pub fn multiplied_by(&self, other: &Self) -> Self {
        Self::reduced(
            self.negative != other.negative,
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn divided_by(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Self::reduced(
            self.negative != other.negative,
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        ))
    }

    /// Truncated remainder: the result takes the sign of `self`, the sign of
    /// `other` is ignored.
    pub fn remainder(&self, other: &Self) -> Result<Self, NumberError> {
        let divisor = &self.denominator * &other.numerator;
        if divisor.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let dividend = &self.numerator * &other.denominator;
        Ok(Self::reduced(
            self.negative,
            dividend % divisor,
            &self.denominator * &other.denominator,
        ))
    }

    /// Raises `self` to an integer power. Negative exponents invert the base.
    pub fn to_the_power_of(&self, exponent: &Self) -> Result<Self, NumberError> {
        let not_implemented = || NumberError::NotImplemented {
            message: format!("Exponentiation not implemented for: {exponent}"),
        };
        if !exponent.is_integer() {
            return Err(not_implemented());
        }
        let power = exponent.numerator.to_u32().ok_or_else(not_implemented)?;

        let base_bits = self.numerator.bits().max(self.denominator.bits());
        if base_bits > 1 && base_bits.saturating_mul(u64::from(power)) > MAX_POWER_BITS {
            return Err(NumberError::NotImplemented {
                message: format!("Exponentiation result too large: {self} ** {exponent}"),
            });
        }

        let negative = self.negative && power % 2 == 1;
        let numerator = self.numerator.pow(power);
        let denominator = self.denominator.pow(power);
        if exponent.negative {
            if numerator.is_zero() {
                return Err(NumberError::DivisionByZero);
            }
            Ok(Self::reduced(negative, denominator, numerator))
        } else {
            Ok(Self::reduced(negative, numerator, denominator))
        }
    }

    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> Self {
        let (quotient, remainder) = self.numerator.div_rem(&self.denominator);
        let quotient = if self.negative && !remainder.is_zero() {
            quotient + 1u32
        } else {
            quotient
        };
        Self::reduced(self.negative, quotient, BigUint::one())
    }

    /// Smallest integer not less than `self`.
    pub fn ceil(&self) -> Self {
        self.negated().floor().negated()
    }

    /// Rounds half away from zero to `digits` decimal places.
    pub fn round(&self, digits: u32) -> Result<Self, NumberError> {
        let scale = decimal_scale(digits)?;
        let (quotient, remainder) = (&self.numerator * &scale).div_rem(&self.denominator);
        let quotient = if remainder * 2u32 >= self.denominator {
            quotient + 1u32
        } else {
            quotient
        };
        Ok(Self::reduced(self.negative, quotient, scale))
    }

    /// Formats with exactly `precision` digits after the decimal point,
    /// rounding half away from zero.
    pub fn to_fixed(&self, precision: u32) -> Result<String, NumberError> {
        // One extra digit decides the rounding.
        let scale = decimal_scale(precision)? * 10u32;
        let mut digits = &self.numerator * scale / &self.denominator;
        if &digits % 10u32 >= BigUint::from(5u32) {
            digits += 10u32;
        }
        digits /= 10u32;

        let negative = self.negative && !digits.is_zero();
        let mut text = digits.to_string();
        let width = precision as usize + 1;
        if text.len() < width {
            text = format!("{}{}", "0".repeat(width - text.len()), text);
        }
        let split = text.len() - precision as usize;
        let (whole, fraction) = text.split_at(split);

        let sign = if negative { "-" } else { "" };
        Ok(if fraction.is_empty() {
            format!("{sign}{whole}")
        } else {
            format!("{sign}{whole}.{fraction}")
        })
    }

    /// Like [`ExactNumber::to_fixed`], with trailing zeros (and a trailing
    /// decimal point) removed.
    pub fn to_decimal_string(&self, precision: u32) -> Result<String, NumberError> {
        let text = self.to_fixed(precision)?;
        if !text.contains('.') {
            return Ok(text);
        }
        Ok(text.trim_end_matches('0').trim_end_matches('.').to_string())
    }

    /// Converts to `f64`, failing unless the conversion is lossless.
    pub fn to_f64(&self) -> Result<f64, NumberError> {
        let text = self.to_fixed(DEFAULT_PRECISION)?;
        let value: f64 = text.parse().map_err(|_| NumberError::Conversion {
            message: format!("Cannot convert {self} to a float"),
        })?;
        let back = Self::try_from(value)?;
        if &back != self {
            return Err(NumberError::Conversion {
                message: format!("Cannot convert {self} to a float exactly: {self} != {back}"),
            });
        }
        Ok(value)
    }
}

/// `10^digits`, refusing digit counts above [`MAX_DIGITS`].
fn decimal_scale(digits: u32) -> Result<BigUint, NumberError> {
    if digits > MAX_DIGITS {
        return Err(NumberError::TooManyDigits { digits });
    }
    Ok(BigUint::from(10u32).pow(digits))
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_decimal(text: &str) -> Option<ExactNumber> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let exponent: i64 = match exponent {
        Some(exp) => {
            let unsigned = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if unsigned.is_empty() || !all_digits(unsigned) {
                return None;
            }
            let value: i64 = exp.parse().ok()?;
            if value.unsigned_abs() > MAX_DECIMAL_EXPONENT {
                return None;
            }
            value
        }
        None => 0,
    };

    let digits: BigUint = format!("{whole}{fraction}").parse().ok()?;
    let scale = fraction.len() as i64 - exponent;
    let ten = BigUint::from(10u32);
    let (numerator, denominator) = if scale >= 0 {
        (digits, ten.pow(u32::try_from(scale).ok()?))
    } else {
        (digits * ten.pow(u32::try_from(-scale).ok()?), BigUint::one())
    };
    Some(ExactNumber::reduced(negative, numerator, denominator))
}

impl FromStr for ExactNumber {
    type Err = NumberError;

    /// Accepts fractions (`-3/4`) and decimal literals with an optional
    /// exponent (`1.25`, `-2e-3`).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::InvalidLiteral {
            text: text.to_string(),
        };
        if let Some((numerator, denominator)) = text.split_once('/') {
            let numerator = parse_integer(numerator).ok_or_else(invalid)?;
            let denominator = parse_integer(denominator).ok_or_else(invalid)?;
            return Self::new(numerator, denominator);
        }
        parse_decimal(text).ok_or_else(invalid)
    }
}

impl TryFrom<f64> for ExactNumber {
    type Error = NumberError;

    /// Exact decimal expansion of the shortest representation of `value`.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(NumberError::NotANumber);
        }
        if value.is_infinite() {
            return Err(NumberError::Infinite);
        }
        value.to_string().parse()
    }
}

impl From<i64> for ExactNumber {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigInt> for ExactNumber {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl core::ops::Neg for ExactNumber {
    type Output = ExactNumber;

    fn neg(self) -> Self::Output {
        let negative = !self.negative && !self.numerator.is_zero();
        Self { negative, ..self }
    }
}

impl core::ops::Neg for &ExactNumber {
    type Output = ExactNumber;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl core::ops::Add for &ExactNumber {
    type Output = ExactNumber;

    fn add(self, other: Self) -> Self::Output {
        self.plus(other)
    }
}

impl core::ops::Sub for &ExactNumber {
    type Output = ExactNumber;

    fn sub(self, other: Self) -> Self::Output {
        self.minus(other)
    }
}

impl core::ops::Mul for &ExactNumber {
    type Output = ExactNumber;

    fn mul(self, other: Self) -> Self::Output {
        self.multiplied_by(other)
    }
}

impl Ord for ExactNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let left = &self.numerator * &other.denominator;
                let right = &other.numerator * &self.denominator;
                let ordering = left.cmp(&right);
                if negative { ordering.reverse() } else { ordering }
            }
        }
    }
}

impl PartialOrd for ExactNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical form: the integer part followed by the fractional remainder,
/// wrapped in parentheses. `(3)`, `(3+1/10)`, `(-1/2)`, `(-3-1/10)`.
impl fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, rest) = self.numerator.div_rem(&self.denominator);
        let sign = if self.negative { "-" } else { "" };
        write!(f, "(")?;
        if rest.is_zero() {
            write!(f, "{sign}{whole}")?;
        } else {
            let joiner = if self.negative { "-" } else { "+" };
            if whole.is_zero() {
                write!(f, "{sign}")?;
            } else {
                write!(f, "{sign}{whole}{joiner}")?;
            }
            write!(f, "{rest}/{}", self.denominator)?;
        }
        write!(f, ")")
    }
}
