//! Exacta - an exact-arithmetic expression language
//!
//! # Overview
//!
//! Exacta evaluates small, user-written expressions inside a host
//! application. Numbers are exact rationals, so `0.1 + 0.2 == 0.3` holds.
//! Common use cases include:
//!
//! - Pricing and unit formulas
//! - Conditional labels and display rules
//! - Reading fields out of JSON payloads
//!
//! # Quick Start
//!
//! ```
//! use exacta::{Environment, HostValue, evaluate};
//!
//! let mut env = Environment::new();
//! env.register("price", 19.99)
//!     .register("quantity", 3)
//!     .register_function("currency", |_| Ok(HostValue::from(" EUR")));
//!
//! let total = evaluate("price * quantity + currency()", &env).unwrap();
//! assert_eq!(total.to_string(), "(59+97/100) EUR");
//! ```
//!
//! # Repeated evaluation
//!
//! [`CachedEvaluator`] remembers the previous call and skips parsing and
//! evaluation when nothing relevant changed:
//!
//! ```
//! use exacta::{CachedEvaluator, Environment};
//!
//! let mut cached = CachedEvaluator::new();
//! let env = Environment::new().with("a", 1).with("unused", 0);
//! cached.evaluate("a + 1", &env).unwrap();
//!
//! let env = Environment::new().with("a", 1).with("unused", 99);
//! cached.evaluate("a + 1", &env).unwrap();
//! assert_eq!(cached.stats().hits, 1);
//! ```

// Re-export public API from exacta_core
pub use exacta_core::api::{
    CacheStats, CachedEvaluator, DEFAULT_STEPS, Environment, Error, ExecutionOptions, evaluate,
    evaluate_ast, evaluate_ast_with_steps, evaluate_with_steps,
};

// Re-export commonly used values and front-end types
pub use exacta_core::parser::{self, Expr, ExpressionParser, Location, ParseError, SourceParser};
pub use exacta_core::stdlib::{self, register_stdlib};
pub use exacta_core::values::{
    self, ExactNumber, HostError, HostResult, HostValue, NativeFunction, NumberError, Value,
};
pub use exacta_core::visitor::{count_nodes, find_identifiers};

// Re-export errors
pub use exacta_core::evaluator::{EvalError, EvalErrorKind};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
