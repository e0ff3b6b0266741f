use pest::error::{InputLocation, LineColLocation};

use super::ast::{Location, Span};
use super::parser::Rule;

/// Parser error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input is not a valid expression.
    #[error("Syntax error: unable to parse expression: {message} {location}")]
    Syntax { message: String, location: Location },
    /// A front end produced more than one tree for the same input.
    #[error("Ambiguous code: {candidates} parse trees for {code:?}")]
    Ambiguous { code: String, candidates: usize },
}

impl ParseError {
    pub fn custom(message: impl Into<String>, location: Location) -> Self {
        ParseError::Syntax {
            message: message.into(),
            location,
        }
    }

    pub(crate) fn from_pest(err: pest::error::Error<Rule>) -> Self {
        let err = err.renamed_rules(|rule| describe_rule(*rule).to_string());
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) | LineColLocation::Span(pos, _) => pos,
        };
        let span = match err.location {
            InputLocation::Pos(pos) => Span::new(pos, pos),
            InputLocation::Span((start, end)) => Span::new(start, end),
        };
        ParseError::Syntax {
            message: err.variant.message().into_owned(),
            location: Location::new(line, column, span),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::Syntax { location, .. } => Some(location),
            ParseError::Ambiguous { .. } => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "P001",
            ParseError::Ambiguous { .. } => "P002",
        }
    }
}

fn describe_rule(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::expression
        | Rule::ternary
        | Rule::logical
        | Rule::equality
        | Rule::arith
        | Rule::unary
        | Rule::exponent
        | Rule::postfix => "expression",
        Rule::grouping => "'('",
        Rule::call => "function call",
        Rule::field_access => "'.'",
        Rule::index_access => "'['",
        Rule::field_key => "field name",
        Rule::coalesce_op => "'??'",
        Rule::or_op => "'||'",
        Rule::and_op => "'&&'",
        Rule::eq => "'=='",
        Rule::ne => "'!='",
        Rule::le => "'<='",
        Rule::ge => "'>='",
        Rule::lt => "'<'",
        Rule::gt => "'>'",
        Rule::add | Rule::pos => "'+'",
        Rule::sub | Rule::neg => "'-'",
        Rule::mul => "'*'",
        Rule::div => "'/'",
        Rule::rem => "'%'",
        Rule::pow_op => "'**'",
        Rule::not_op => "'!'",
        Rule::keyword => "keyword",
        Rule::identifier => "identifier",
        Rule::number => "number",
        Rule::string | Rule::single_inner | Rule::double_inner | Rule::escape => "string",
        Rule::main => "input",
        _ => "token",
    }
}
