//! Tests for the string functions

use pretty_assertions::assert_eq;

use crate::api::{Environment, Error, evaluate};
use crate::stdlib::register_stdlib;
use crate::values::Value;

fn eval_string_expr(source: &str) -> Result<Value, Error> {
    let mut env = Environment::new();
    register_stdlib(&mut env);
    evaluate(source, &env)
}

fn check(source: &str, expected: impl Into<Value>) {
    let result = eval_string_expr(source)
        .unwrap_or_else(|e| panic!("evaluation should succeed for: {source}\nError: {e}"));
    assert_eq!(result, expected.into(), "{source}");
}

#[test]
fn test_trim() {
    check("trim('  hello  ')", "hello");
    check("trim('\\t\\n x \\n')", "x");
    check("trim('')", "");
}

#[test]
fn test_case_mapping() {
    check("upper('hello World')", "HELLO WORLD");
    check("lower('HeLLo')", "hello");
    check("upper('straße')", "STRASSE");
    check("lower('ÀÉÎ')", "àéî");
}

#[test]
fn test_len_counts_code_points() {
    check("len('')", 0);
    check("len('hello')", 5);
    check("len('héllo')", 5);
    check("len('\\ud83d\\ude00')", 1);
}

#[test]
fn test_contains() {
    check("contains('hello world', 'o w')", true);
    check("contains('hello', 'xyz')", false);
    check("contains('hello', '')", true);
}

#[test]
fn test_argument_errors() {
    let err = eval_string_expr("trim('a', 'b')").unwrap_err();
    assert_eq!(err.message(), "[function trim]:\nexpected 1 argument(s), got 2");

    let err = eval_string_expr("contains('a', null)").unwrap_err();
    assert_eq!(
        err.message(),
        "[function contains]:\nargument 2 must be a string, got null"
    );

    let err = eval_string_expr("len(12)").unwrap_err();
    assert!(err.to_string().ends_with("@ line 1 col 1"), "{err}");
}
