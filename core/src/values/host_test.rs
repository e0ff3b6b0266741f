use pretty_assertions::assert_eq;

use super::{ExactNumber, HostValue, NativeFunction, NumberError, SanitizeError, Value};

#[test]
fn test_sanitize_converts_floats_exactly() {
    let value = HostValue::from(0.1).sanitize().unwrap();
    assert_eq!(value, Value::Number("1/10".parse().unwrap()));

    assert_eq!(
        HostValue::from(7i64).sanitize().unwrap(),
        Value::Number(ExactNumber::from(7))
    );
    assert_eq!(HostValue::from(None::<bool>).sanitize().unwrap(), Value::Null);
}

#[test]
fn test_sanitize_rejects_non_finite_floats_and_functions() {
    assert_eq!(
        HostValue::from(f64::NAN).sanitize(),
        Err(SanitizeError::Number(NumberError::NotANumber))
    );
    assert_eq!(
        HostValue::from(f64::INFINITY).sanitize(),
        Err(SanitizeError::Number(NumberError::Infinite))
    );
    assert_eq!(
        HostValue::function(|_| Ok(HostValue::Null)).sanitize(),
        Err(SanitizeError::Function)
    );
}

#[test]
fn test_same_as_uses_identity_for_functions() {
    let f = NativeFunction::new(|_| Ok(HostValue::Null));
    let g = NativeFunction::new(|_| Ok(HostValue::Null));

    assert!(HostValue::from(f.clone()).same_as(&HostValue::from(f.clone())));
    assert!(!HostValue::from(f).same_as(&HostValue::from(g)));
}

#[test]
fn test_same_as_compares_floats_by_bits() {
    assert!(HostValue::from(f64::NAN).same_as(&HostValue::from(f64::NAN)));
    assert!(!HostValue::from(0.0).same_as(&HostValue::from(-0.0)));
    assert!(!HostValue::from(1i64).same_as(&HostValue::from(1.0)));
    assert!(HostValue::from("a").same_as(&HostValue::from("a".to_string())));
}
