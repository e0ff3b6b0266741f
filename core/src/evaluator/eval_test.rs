use std::cell::RefCell;
use std::rc::Rc;

use indoc::indoc;
use pretty_assertions::assert_eq;

use super::{EvalError, EvalErrorKind, Evaluator, EvaluatorOptions, eval, eval_with_limits};
use crate::api::{self, Environment};
use crate::parser::parse;
use crate::test_utils::init_test_logging;
use crate::values::{ExactNumber, HostValue, Value};

fn run(source: &str, env: &Environment) -> Result<Value, EvalError> {
    let expr = parse(source).unwrap().expect("expression should not be empty");
    eval(&expr, env)
}

fn ok(source: &str) -> String {
    run(source, &Environment::new()).unwrap().to_string()
}

fn err(source: &str, env: &Environment) -> EvalError {
    run(source, env).unwrap_err()
}

#[derive(Debug, thiserror::Error)]
#[error("sensor offline")]
struct SensorOffline;

#[test]
fn test_exact_arithmetic() {
    init_test_logging();
    assert_eq!(ok("0.1 + 0.2"), "(3/10)");
    assert_eq!(ok("0.1 + 0.2 == 0.3"), "true");
    assert_eq!(ok("1 / 3 * 3"), "(1)");
    assert_eq!(ok("2 ** 10"), "(1024)");
    assert_eq!(ok("-(2 ** 2)"), "(-4)");
    assert_eq!(ok("(-2) ** 3"), "(-8)");
    assert_eq!(ok("2 ** -2"), "(1/4)");
    assert_eq!(ok("7 % 3"), "(1)");
    assert_eq!(ok("-7 % 3"), "(-1)");
    assert_eq!(ok("1e2 / 8"), "(12+1/2)");
}

#[test]
fn test_strings_and_concatenation() {
    assert_eq!(ok("'a' + 'b'"), "ab");
    assert_eq!(ok("'n=' + 1 / 2"), "n=(1/2)");
    assert_eq!(ok("\"x\" + null"), "xnull");
    assert_eq!(ok("'x' + true"), "xtrue");
}

#[test]
fn test_comparisons_and_logic() {
    assert_eq!(ok("1 < 2 && 2 <= 2"), "true");
    assert_eq!(ok("3 > 4 || 4 >= 5"), "false");
    assert_eq!(ok("!(1 == 1)"), "false");
    assert_eq!(ok("'1' == 1"), "false");
    assert_eq!(ok("null != false"), "true");
    assert_eq!(ok("null ?? 'fallback'"), "fallback");
    assert_eq!(ok("false ?? 'fallback'"), "false");
}

#[test]
fn test_ternary_uses_truthiness() {
    assert_eq!(ok("true ? 1 : 2"), "(1)");
    assert_eq!(ok("0 ? 1 : 2"), "(1)");
    assert_eq!(ok("'' ? 1 : 2"), "(2)");
    assert_eq!(ok("'no' ? 1 : 2"), "(1)");
    assert_eq!(ok("null ? 1 : 2"), "(2)");
}

#[test]
fn test_short_circuit_skips_right_operand() {
    let env = Environment::new();
    assert_eq!(run("false && missing", &env).unwrap(), Value::Bool(false));
    assert_eq!(run("true || missing()", &env).unwrap(), Value::Bool(true));
    assert_eq!(run("1 ?? missing", &env).unwrap(), Value::from(1));

    let e = err("true && missing", &env);
    assert!(matches!(e.kind, EvalErrorKind::UndefinedVariable { ref name } if name == "missing"));
    let e = err("true && 1", &env);
    assert_eq!(e.kind.to_string(), "Expected boolean, got rational");
    let e = err("1 || true", &env);
    assert!(matches!(e.kind, EvalErrorKind::TypeMismatch { expected: "boolean", .. }));
}

#[test]
fn test_variables_from_environment() {
    let env = Environment::new()
        .with("price", 19.99)
        .with("qty", 3)
        .with("label", "total")
        .with("nothing", ());
    assert_eq!(
        run("label + ': ' + price * qty", &env).unwrap(),
        Value::from("total: (59+97/100)")
    );
    assert_eq!(run("nothing ?? qty", &env).unwrap(), Value::from(3));
}

#[test]
fn test_error_messages_carry_locations() {
    let env = Environment::new();
    assert_eq!(err("1 + x", &env).to_string(), "Variable not defined: x @ line 1 col 5");
    assert_eq!(err("1 / 0", &env).to_string(), "Division by zero @ line 1 col 3");
    assert_eq!(err("f(1)", &env).to_string(), "Function not defined: f @ line 1 col 1");
    assert_eq!(err("1 +\n  y", &env).to_string(), "Variable not defined: y @ line 2 col 3");
}

#[test]
fn test_error_codes() {
    let env = Environment::new().with("n", 1).with("f", HostValue::function(|_| Ok(().into())));
    let cases = [
        ("x", "R001"),
        ("g()", "R002"),
        ("n()", "R003"),
        ("f", "R004"),
        ("-'a'", "R005"),
        ("true + 1", "R006"),
        ("1 % 0", "R007"),
        ("4 ** 0.5", "R008"),
        ("'[1'[0]", "R010"),
        ("n.a", "R011"),
        ("'[1]'[true]", "R012"),
    ];
    for (source, code) in cases {
        assert_eq!(err(source, &env).code(), code, "{source}");
    }
}

#[test]
fn test_fractional_power_is_not_implemented() {
    let e = err("4 ** 0.5", &Environment::new());
    assert!(e.to_string().starts_with("Exponentiation not implemented for: (1/2)"), "{e}");
}

#[test]
fn test_json_access() {
    let env = Environment::new().with(
        "order",
        r#"{"items": [{"name": "pen", "price": 1.25}], "note": null}"#,
    );
    assert_eq!(run("order.items[0].name", &env).unwrap(), Value::from("pen"));
    assert_eq!(run("order.items[0].price * 4", &env).unwrap(), Value::from(5));
    assert_eq!(run("order['note'] ?? 'none'", &env).unwrap(), Value::from("none"));
    assert_eq!(run("order.missing", &env).unwrap(), Value::Null);
    assert_eq!(run("order.items[5]", &env).unwrap(), Value::Null);
    assert_eq!(run("null.anything", &env).unwrap(), Value::Null);
    assert_eq!(
        run("order.items", &env).unwrap(),
        Value::from(r#"[{"name":"pen","price":1.25}]"#)
    );
}

#[test]
fn test_dynamic_key_is_checked_before_object() {
    let env = Environment::new();
    let e = err("a[b]", &env);
    assert!(matches!(e.kind, EvalErrorKind::UndefinedVariable { ref name } if name == "b"));

    let e = err("a[true]", &env);
    assert_eq!(e.kind.to_string(), "Invalid key type: boolean");

    let e = err("a[null]", &env);
    assert!(matches!(e.kind, EvalErrorKind::InvalidKey { .. }));
}

#[test]
fn test_host_functions_receive_evaluated_arguments() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);
    let env = Environment::new().with(
        "pair",
        HostValue::function(move |args| {
            record.borrow_mut().extend(args.iter().cloned());
            Ok(HostValue::Str(format!("{}|{}", args[0], args[1])))
        }),
    );
    assert_eq!(run("pair(1 / 4, 'x' + 'y')", &env).unwrap(), Value::from("(1/4)|xy"));
    assert_eq!(
        *seen.borrow(),
        vec![Value::Number(ExactNumber::new(1, 4).unwrap()), Value::from("xy")]
    );
}

#[test]
fn test_host_function_results_are_sanitized() {
    let env = Environment::new()
        .with("half", HostValue::function(|_| Ok(HostValue::Float(0.5))))
        .with("big", HostValue::function(|_| Ok(HostValue::Int(i64::MAX))))
        .with("none", HostValue::function(|_| Ok(HostValue::Null)));
    assert_eq!(run("half() * 2", &env).unwrap(), Value::from(1));
    assert_eq!(run("big() + 1", &env).unwrap().to_string(), "(9223372036854775808)");
    assert_eq!(run("none()", &env).unwrap(), Value::Null);
}

#[test]
fn test_invalid_return_values() {
    let env = Environment::new()
        .with("nan", HostValue::function(|_| Ok(HostValue::Float(f64::NAN))))
        .with(
            "factory",
            HostValue::function(|_| Ok(HostValue::function(|_| Ok(HostValue::Null)))),
        );

    let e = err("nan(1, 'a')", &env);
    assert_eq!(e.code(), "R014");
    let message = e.to_string();
    assert!(message.contains("[function nan] returned an invalid value"), "{message}");
    assert!(message.contains("NaN is not a valid number."), "{message}");
    assert!(message.contains("arguments: ((1), \"a\")"), "{message}");

    let e = err("factory()", &env);
    assert!(e.to_string().contains("functions cannot be used as values"), "{e}");
}

#[test]
fn test_host_errors_are_wrapped() {
    let env = Environment::new().with(
        "read",
        HostValue::function(|_| Err(SensorOffline.into())),
    );
    let e = err("1 + read()", &env);
    assert_eq!(e.to_string(), "[function read]:\nsensor offline @ line 1 col 5");

    let source = std::error::Error::source(&e).expect("host error kept as source");
    assert!(source.downcast_ref::<SensorOffline>().is_some());
}

#[test]
fn test_host_function_may_evaluate_nested_expressions() {
    let env = Environment::new().with(
        "calc",
        HostValue::function(|args| {
            let [Value::Str(code)] = args else {
                return Err("calc expects one string".into());
            };
            let inner = Environment::new().with("x", 10);
            Ok(api::evaluate(code, &inner)?.into())
        }),
    );
    assert_eq!(run("calc('x * x') + 1", &env).unwrap(), Value::from(101));

    let e = err("calc('x +')", &env);
    assert!(matches!(e.kind, EvalErrorKind::HostFunction { ref name, .. } if name == "calc"));
    assert!(e.to_string().contains("Syntax error"), "{e}");
}

#[test]
fn test_step_limit() {
    let env = Environment::new();
    let source = vec!["1"; 501].join("+");
    let e = err(&source, &env);
    assert!(matches!(e.kind, EvalErrorKind::StepLimitExceeded { max_steps: 1000 }));
    assert_eq!(e.kind.to_string(), "Exceeded step limit of 1000 steps.");

    // 500 numbers and 499 operators fit.
    let source = vec!["1"; 500].join("+");
    assert_eq!(run(&source, &env).unwrap(), Value::from(500));
}

#[test]
fn test_step_budget_is_nodes_plus_one() {
    let env = Environment::new();
    let expr = parse("(1 + 2) * 3").unwrap().unwrap();
    // Five nodes plus the grouping.
    assert!(eval_with_limits(&expr, &env, 6).is_err());
    assert_eq!(eval_with_limits(&expr, &env, 7).unwrap(), Value::from(9));

    let mut evaluator = Evaluator::new(EvaluatorOptions { max_steps: 7 }, &env);
    evaluator.eval(&expr).unwrap();
    assert_eq!(evaluator.steps_taken(), 6);
}

#[test]
fn test_short_circuit_saves_steps() {
    let env = Environment::new();
    let expr = parse("false && (1 + 2 + 3 + 4)").unwrap().unwrap();
    assert_eq!(eval_with_limits(&expr, &env, 3).unwrap(), Value::Bool(false));
}

#[test]
fn test_multi_line_expression() {
    let source = indoc! {"
        qty >= 10
            ? fixed(price * qty * 0.9, 2)
            : fixed(price * qty, 2)
    "};
    let env = Environment::new()
        .with("qty", 12)
        .with("price", 2.5)
        .with(
            "fixed",
            HostValue::function(|args| match args {
                [Value::Number(n), Value::Number(digits)] => {
                    let digits = digits.to_integer().and_then(|d| u32::try_from(d).ok());
                    Ok(n.to_fixed(digits.ok_or("bad digits")?)?.into())
                }
                _ => Err("fixed expects two numbers".into()),
            }),
        );
    assert_eq!(run(source, &env).unwrap(), Value::from("27.00"));
}
