use super::ast::Expr;
use super::error::ParseError;
use super::parser::{self, ExpressionParser};

/// A source-to-tree front end.
///
/// Implementors return every tree the input can be read as. [`SourceParser::parse`]
/// accepts only unambiguous input.
pub trait SourceParser {
    fn parse_candidates(&self, code: &str) -> Result<Vec<Expr>, ParseError>;

    /// Parses `code`, yielding `None` for empty input.
    fn parse(&self, code: &str) -> Result<Option<Expr>, ParseError> {
        let mut candidates = self.parse_candidates(code)?;
        match candidates.len() {
            0 | 1 => Ok(candidates.pop()),
            n => Err(ParseError::Ambiguous {
                code: code.to_string(),
                candidates: n,
            }),
        }
    }
}

impl SourceParser for ExpressionParser {
    fn parse_candidates(&self, code: &str) -> Result<Vec<Expr>, ParseError> {
        Ok(parser::parse(code)?.into_iter().collect())
    }
}
