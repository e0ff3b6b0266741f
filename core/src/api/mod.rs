//! Public API for evaluating exacta expressions.
//!
//! Two entry points:
//!
//! 1. **One-shot**: [`evaluate`] parses and evaluates in a single call.
//! 2. **Cached**: [`CachedEvaluator`] remembers the last parse and outcome and
//!    skips work when neither the source nor the relevant bindings changed.
//!
//! # Example
//!
//! ```
//! use exacta_core::api::{Environment, evaluate};
//! use exacta_core::values::HostValue;
//!
//! let mut env = Environment::new();
//! env.register("width", 0.3)
//!     .register_function("unit", |_| Ok(HostValue::from("cm")));
//!
//! let result = evaluate("width * 3 + unit()", &env).unwrap();
//! assert_eq!(result.to_string(), "(9/10)cm");
//! ```

mod cached;
mod environment;
mod error;
mod evaluate;
mod options;

pub use cached::{CacheStats, CachedEvaluator};
pub use environment::Environment;
pub use error::Error;
pub use evaluate::{evaluate, evaluate_ast, evaluate_ast_with_steps, evaluate_with_steps};
pub use options::{DEFAULT_STEPS, ExecutionOptions};
