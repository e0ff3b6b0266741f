//! Exact-arithmetic expression language.
//!
//! Source text is parsed into an [`parser::Expr`] tree and evaluated against
//! an [`api::Environment`] of host values. All numbers are exact rationals.

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod stdlib;
pub mod values;
pub mod visitor;
