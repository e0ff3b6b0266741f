//! Field and index access.
//!
//! Strings are the only structured values: accessing into one parses it as
//! JSON. Scalars come back as values, nested arrays and objects come back as
//! JSON text again, with object keys in sorted order.

use num_traits::ToPrimitive;
use serde_json::Value as Json;

use crate::evaluator::EvalErrorKind;
use crate::values::{ExactNumber, Value};

fn describe(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("'{s}'"),
        Value::Null => "null".to_string(),
        other => format!("{} {other}", other.type_name()),
    }
}

fn not_accessible(what: &str, object: &Value) -> EvalErrorKind {
    EvalErrorKind::Access {
        message: format!("Cannot access {what} of {}", describe(object)),
    }
}

fn parse_json(text: &str, what: &str) -> Result<Json, EvalErrorKind> {
    serde_json::from_str(text).map_err(|err| EvalErrorKind::Json {
        message: format!("Cannot access {what} of string because it is invalid JSON: {err}"),
    })
}

fn from_json(json: &Json) -> Result<Value, EvalErrorKind> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::String(s) => Value::Str(s.clone()),
        Json::Number(n) => Value::Number(n.to_string().parse::<ExactNumber>()?),
        Json::Array(_) | Json::Object(_) => {
            Value::Str(serde_json::to_string(json).map_err(|err| EvalErrorKind::Json {
                message: format!("Cannot serialize JSON value: {err}"),
            })?)
        }
    })
}

/// `object.key`
pub(super) fn field(object: &Value, key: &str) -> Result<Value, EvalErrorKind> {
    let what = format!("field '{key}'");
    let text = match object {
        Value::Null => return Ok(Value::Null),
        Value::Str(text) => text,
        other => return Err(not_accessible(&what, other)),
    };
    match parse_json(text, &what)? {
        Json::Object(map) => map.get(key).map_or(Ok(Value::Null), from_json),
        _ => Err(EvalErrorKind::Access {
            message: format!("Cannot access {what} of string because it is not an object"),
        }),
    }
}

/// `object[key]`. The key must already be a number or a string.
pub(super) fn index(object: &Value, key: &Value) -> Result<Value, EvalErrorKind> {
    let what = format!("key {}", describe(key));
    let text = match object {
        Value::Null => return Ok(Value::Null),
        Value::Str(text) => text,
        other => return Err(not_accessible(&what, other)),
    };
    match (parse_json(text, &what)?, key) {
        (Json::Null, _) => Ok(Value::Null),
        (Json::Array(items), Value::Number(n)) => {
            let Some(position) = n.to_integer() else {
                return Err(EvalErrorKind::InvalidKey {
                    message: format!("Invalid key {n}: array indices must be integers"),
                });
            };
            match position.to_usize().and_then(|i| items.get(i)) {
                Some(item) => from_json(item),
                None => Ok(Value::Null),
            }
        }
        (Json::Array(_), _) => Err(EvalErrorKind::Access {
            message: format!("Cannot access {what} of string because arrays need a numeric key"),
        }),
        (Json::Object(map), Value::Str(k)) => map.get(k).map_or(Ok(Value::Null), from_json),
        (Json::Object(_), _) => Err(EvalErrorKind::Access {
            message: format!("Cannot access {what} of string because objects need a string key"),
        }),
        _ => Err(EvalErrorKind::Access {
            message: format!("Cannot access {what} of string because it is not an object or array"),
        }),
    }
}

/// Validates a dynamic access key before the object is evaluated.
pub(super) fn check_key(key: &Value) -> Result<(), EvalErrorKind> {
    match key {
        Value::Number(_) | Value::Str(_) => Ok(()),
        other => Err(EvalErrorKind::InvalidKey {
            message: format!("Invalid key type: {}", other.type_name()),
        }),
    }
}
