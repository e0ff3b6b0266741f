use pretty_assertions::assert_eq;

use super::number::{ExactNumber, MAX_DIGITS, NumberError};

fn num(text: &str) -> ExactNumber {
    text.parse()
        .unwrap_or_else(|e| panic!("failed to parse {text:?}: {e}"))
}

#[test]
fn test_construction_reduces_and_normalizes_sign() {
    let value = ExactNumber::new(6, -4).unwrap();
    assert_eq!(value.to_string(), "(-1-1/2)");
    assert_eq!(value.numerator().to_string(), "3");
    assert_eq!(value.denominator().to_string(), "2");

    assert_eq!(ExactNumber::new(-6, -4).unwrap(), num("3/2"));
    assert_eq!(ExactNumber::from_parts(1, 2, -1).unwrap(), num("-0.5"));
    assert_eq!(ExactNumber::new(0, 5).unwrap(), ExactNumber::zero());
    assert_eq!(ExactNumber::new(0, -5).unwrap().signum(), 1);
}

#[test]
fn test_zero_denominator_is_rejected() {
    assert_eq!(ExactNumber::new(1, 0), Err(NumberError::DivisionByZero));
    assert_eq!("1/0".parse::<ExactNumber>(), Err(NumberError::DivisionByZero));
}

#[test]
fn test_canonical_display() {
    assert_eq!(num("3").to_string(), "(3)");
    assert_eq!(num("3.1").to_string(), "(3+1/10)");
    assert_eq!(num("-0.5").to_string(), "(-1/2)");
    assert_eq!(num("-3.1").to_string(), "(-3-1/10)");
    assert_eq!(num("0").to_string(), "(0)");
    assert_eq!(num("-0").to_string(), "(0)");
}

#[test]
fn test_decimal_arithmetic_is_exact() {
    assert_eq!(num("0.1").plus(&num("0.2")), num("0.3"));
    assert_eq!(num("0.3").minus(&num("0.1")), num("0.2"));
    assert_eq!(num("1.1").multiplied_by(&num("1.1")), num("1.21"));
    assert_eq!(num("1").divided_by(&num("3")).unwrap(), num("1/3"));
    assert_eq!(num("1").divided_by(&num("0")), Err(NumberError::DivisionByZero));
}

#[test]
fn test_remainder_follows_dividend_sign() {
    assert_eq!(num("9").remainder(&num("5")).unwrap(), num("4"));
    assert_eq!(num("-9").remainder(&num("5")).unwrap(), num("-4"));
    assert_eq!(num("9").remainder(&num("-5")).unwrap(), num("4"));
    assert_eq!(num("7.5").remainder(&num("2")).unwrap(), num("1.5"));
    assert_eq!(num("1").remainder(&num("0")), Err(NumberError::DivisionByZero));
}

#[test]
fn test_integer_powers() {
    assert_eq!(num("2").to_the_power_of(&num("10")).unwrap(), num("1024"));
    assert_eq!(num("2").to_the_power_of(&num("-2")).unwrap(), num("0.25"));
    assert_eq!(num("-2").to_the_power_of(&num("3")).unwrap(), num("-8"));
    assert_eq!(num("-2").to_the_power_of(&num("2")).unwrap(), num("4"));
    assert_eq!(num("1/3").to_the_power_of(&num("2")).unwrap(), num("1/9"));
    assert_eq!(num("0").to_the_power_of(&num("0")).unwrap(), num("1"));
    assert_eq!(
        num("0").to_the_power_of(&num("-1")),
        Err(NumberError::DivisionByZero)
    );
}

#[test]
fn test_fractional_power_is_not_implemented() {
    let err = num("4").to_the_power_of(&num("0.5")).unwrap_err();
    assert_eq!(
        err,
        NumberError::NotImplemented {
            message: "Exponentiation not implemented for: (1/2)".to_string()
        }
    );
}

#[test]
fn test_oversized_power_is_refused() {
    let err = num("10").to_the_power_of(&num("100000000")).unwrap_err();
    assert!(matches!(err, NumberError::NotImplemented { .. }));
    // Trivial bases never grow.
    assert_eq!(num("1").to_the_power_of(&num("100000000")).unwrap(), num("1"));
    assert_eq!(num("-1").to_the_power_of(&num("100000001")).unwrap(), num("-1"));
}

#[test]
fn test_ordering() {
    assert!(num("1/3") < num("0.34"));
    assert!(num("-1/3") > num("-0.34"));
    assert!(num("-1") < num("0"));
    assert_eq!(num("2/4").cmp(&num("0.5")), core::cmp::Ordering::Equal);
}

#[test]
fn test_to_fixed_rounds_half_away_from_zero() {
    assert_eq!(num("1/3").to_fixed(5).unwrap(), "0.33333");
    assert_eq!(num("2/3").to_fixed(2).unwrap(), "0.67");
    assert_eq!(num("0.125").to_fixed(2).unwrap(), "0.13");
    assert_eq!(num("-0.125").to_fixed(2).unwrap(), "-0.13");
    assert_eq!(num("-1/20").to_fixed(3).unwrap(), "-0.050");
    assert_eq!(num("-0.001").to_fixed(2).unwrap(), "0.00");
    assert_eq!(num("12.5").to_fixed(0).unwrap(), "13");
    assert_eq!(num("1234").to_fixed(2).unwrap(), "1234.00");
}

#[test]
fn test_to_decimal_string_trims_zeros() {
    assert_eq!(num("1.5").to_decimal_string(10).unwrap(), "1.5");
    assert_eq!(num("2").to_decimal_string(4).unwrap(), "2");
    assert_eq!(num("1/3").to_decimal_string(4).unwrap(), "0.3333");
    assert_eq!(num("100").to_decimal_string(0).unwrap(), "100");
}

#[test]
fn test_digit_counts_are_bounded() {
    let third = num("1/3");
    assert_eq!(third.to_fixed(MAX_DIGITS).unwrap().len(), MAX_DIGITS as usize + 2);
    assert_eq!(
        third.to_fixed(u32::MAX),
        Err(NumberError::TooManyDigits { digits: u32::MAX })
    );
    assert_eq!(
        third.round(1_000_000_000),
        Err(NumberError::TooManyDigits {
            digits: 1_000_000_000
        })
    );
    assert!(third.to_decimal_string(MAX_DIGITS + 1).is_err());
}

#[test]
fn test_parse_literals() {
    assert_eq!(num("1e3"), num("1000"));
    assert_eq!(num("1.5E-2"), num("3/200"));
    assert_eq!(num("-2.50"), num("-5/2"));
    assert_eq!(num(".5"), num("1/2"));
    assert_eq!(num("10/-4"), num("-2.5"));

    for bad in ["", "abc", "1.2.3", "1e", "--1", "1/2/3", "1/x", "1e999999"] {
        assert_eq!(
            bad.parse::<ExactNumber>(),
            Err(NumberError::InvalidLiteral {
                text: bad.to_string()
            }),
            "parsing {bad:?}"
        );
    }
}

#[test]
fn test_float_conversion() {
    assert_eq!(ExactNumber::try_from(0.1).unwrap(), num("0.1"));
    assert_eq!(ExactNumber::try_from(-2.5).unwrap(), num("-5/2"));
    assert_eq!(ExactNumber::try_from(1e21).unwrap(), num("1e21"));
    assert_eq!(ExactNumber::try_from(f64::NAN), Err(NumberError::NotANumber));
    assert_eq!(
        ExactNumber::try_from(f64::NEG_INFINITY),
        Err(NumberError::Infinite)
    );

    assert_eq!(num("0.1").to_f64().unwrap(), 0.1);
    assert_eq!(num("-42").to_f64().unwrap(), -42.0);
    assert!(matches!(
        num("1/3").to_f64(),
        Err(NumberError::Conversion { .. })
    ));
}

#[test]
fn test_rounding_helpers() {
    assert_eq!(num("2.5").floor(), num("2"));
    assert_eq!(num("-2.5").floor(), num("-3"));
    assert_eq!(num("2.5").ceil(), num("3"));
    assert_eq!(num("-2.5").ceil(), num("-2"));
    assert_eq!(num("-2").ceil(), num("-2"));
    assert_eq!(num("2.345").round(2).unwrap(), num("2.35"));
    assert_eq!(num("-2.345").round(2).unwrap(), num("-2.35"));
    assert_eq!(num("2.5").round(0).unwrap(), num("3"));
    assert_eq!(num("1/3").to_integer(), None);
    assert_eq!(num("-7").to_integer().map(|i| i.to_string()), Some("-7".to_string()));
}

#[test]
fn test_operator_traits_on_references() {
    let (a, b) = (num("1/2"), num("1/3"));
    assert_eq!(&a + &b, num("5/6"));
    assert_eq!(&a - &b, num("1/6"));
    assert_eq!(&a * &b, num("1/6"));
    assert_eq!(-&a, num("-0.5"));
    assert_eq!(a.negated().abs(), a);
}
