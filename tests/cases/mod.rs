#![allow(dead_code)]

use exacta::{Environment, HostValue, evaluate, register_stdlib};

/// Environment with the standard library and the given bindings.
pub fn environment(bindings: Vec<(&str, HostValue)>) -> Environment {
    let mut env = Environment::new();
    register_stdlib(&mut env);
    for (name, value) in bindings {
        env.register(name, value);
    }
    env
}

/// Evaluates `source`, returning the canonical text of the result or the
/// full error message.
pub fn run(source: &str, env: &Environment) -> Result<String, String> {
    evaluate(source, env)
        .map(|value| value.to_string())
        .map_err(|err| err.to_string())
}

/// Declares a test evaluating `input`, optionally with `env` bindings, and
/// checking either the displayed `result` or the full `error` message.
macro_rules! test_case {
    (
        $name:ident,
        input: $input:expr,
        $(env: { $($var:literal => $value:expr),* $(,)? },)?
        result: $result:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let env = crate::cases::environment(vec![
                $($(($var, exacta::HostValue::from($value))),*)?
            ]);
            pretty_assertions::assert_eq!(
                crate::cases::run($input, &env),
                Ok(String::from($result))
            );
        }
    };
    (
        $name:ident,
        input: $input:expr,
        $(env: { $($var:literal => $value:expr),* $(,)? },)?
        error: $error:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let env = crate::cases::environment(vec![
                $($(($var, exacta::HostValue::from($value))),*)?
            ]);
            pretty_assertions::assert_eq!(
                crate::cases::run($input, &env),
                Err(String::from($error))
            );
        }
    };
}
