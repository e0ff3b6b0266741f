pub mod ast;
pub mod error;
mod frontend;
pub mod parser;

pub use ast::{BinaryFamily, BinaryOp, Expr, ExprKind, Keyword, Location, Span, UnaryOp};
pub use error::ParseError;
pub use frontend::SourceParser;
pub use parser::{ExpressionParser, Rule, parse};
