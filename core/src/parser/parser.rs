use lazy_static::lazy_static;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use super::ast::{BinaryFamily, BinaryOp, Expr, Keyword, Location, Span, UnaryOp};
use super::error::ParseError;

lazy_static! {
    // Sum and product levels.
    static ref ARITH_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left)
            | Op::infix(Rule::div, Assoc::Left)
            | Op::infix(Rule::rem, Assoc::Left));

    // `??` never shares a chain with `||` or `&&`, so it can sit at the
    // `||` level.
    static ref LOGICAL_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::or_op, Assoc::Left) | Op::infix(Rule::coalesce_op, Assoc::Left))
        .op(Op::infix(Rule::and_op, Assoc::Left));
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// Parses `source` into a syntax tree. Empty or whitespace-only input yields
/// `None`.
pub fn parse(source: &str) -> Result<Option<Expr>, ParseError> {
    let mut pairs = <ExpressionParser as pest::Parser<Rule>>::parse(Rule::main, source)
        .map_err(ParseError::from_pest)?;
    let Some(main) = pairs.next() else {
        return Ok(None);
    };
    let lowering = Lowering::new(source);
    for pair in main.into_inner() {
        if pair.as_rule() == Rule::expression {
            return lowering.expr(pair).map(Some);
        }
    }
    Ok(None)
}

/// Line starts of the source, so node locations are found by binary search
/// instead of rescanning the input from the top.
struct LineIndex<'i> {
    source: &'i str,
    starts: Vec<usize>,
}

impl<'i> LineIndex<'i> {
    fn new(source: &'i str) -> Self {
        let starts = core::iter::once(0)
            .chain(source.match_indices('\n').map(|(at, _)| at + 1))
            .collect();
        Self { source, starts }
    }

    /// 1-based line and column (in chars) of a byte offset.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];
        let before = &self.source[start..offset];
        let column = if before.is_ascii() {
            before.len()
        } else {
            before.chars().count()
        };
        (line, column + 1)
    }
}

/// Turns pest pairs into [`Expr`] nodes.
struct Lowering<'i> {
    lines: LineIndex<'i>,
}

impl<'i> Lowering<'i> {
    fn new(source: &'i str) -> Self {
        Self {
            lines: LineIndex::new(source),
        }
    }

    fn location_of(&self, pair: &Pair<'_, Rule>) -> Location {
        let span = pair.as_span();
        let (line, column) = self.lines.line_col(span.start());
        Location::new(line, column, Span::from(span))
    }

    fn unexpected(&self, pair: &Pair<'_, Rule>) -> ParseError {
        ParseError::custom(
            format!("unexpected {:?} '{}'", pair.as_rule(), pair.as_str()),
            self.location_of(pair),
        )
    }

    /// Folds `operand (op operand)*` into a left-leaning tree.
    fn chain(&self, pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
        let location = self.location_of(&pair);
        let mut inner = pair.into_inner();
        let mut left = self.expr(next_pair(&mut inner, &location)?)?;
        while let Some(op_pair) = inner.next() {
            let op = self.binary_op(&op_pair)?;
            let right = self.expr(next_pair(&mut inner, &location)?)?;
            left = Expr::binary(op, left, right).at(self.location_of(&op_pair));
        }
        Ok(left)
    }

    /// Runs a Pratt parser over `operand (op operand)*`, keeping only
    /// operators of the given families.
    fn pratt(
        &self,
        parser: &PrattParser<Rule>,
        pair: Pair<'_, Rule>,
        families: &[BinaryFamily],
    ) -> Result<Expr, ParseError> {
        parser
            .map_primary(|primary| self.expr(primary))
            .map_infix(|lhs, op, rhs| {
                let binary = self.binary_op(&op)?;
                if !families.contains(&binary.family()) {
                    return Err(self.unexpected(&op));
                }
                Ok(Expr::binary(binary, lhs?, rhs?).at(self.location_of(&op)))
            })
            .parse(pair.into_inner())
    }

    fn binary_op(&self, pair: &Pair<'_, Rule>) -> Result<BinaryOp, ParseError> {
        Ok(match pair.as_rule() {
            Rule::add => BinaryOp::Add,
            Rule::sub => BinaryOp::Sub,
            Rule::mul => BinaryOp::Mul,
            Rule::div => BinaryOp::Div,
            Rule::rem => BinaryOp::Rem,
            Rule::pow_op => BinaryOp::Pow,
            Rule::eq => BinaryOp::Eq,
            Rule::ne => BinaryOp::Ne,
            Rule::lt => BinaryOp::Lt,
            Rule::le => BinaryOp::Le,
            Rule::gt => BinaryOp::Gt,
            Rule::ge => BinaryOp::Ge,
            Rule::and_op => BinaryOp::And,
            Rule::or_op => BinaryOp::Or,
            Rule::coalesce_op => BinaryOp::Coalesce,
            _ => return Err(self.unexpected(pair)),
        })
    }

    fn expr(&self, pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
        let location = self.location_of(&pair);
        match pair.as_rule() {
            Rule::expression => {
                let mut inner = pair.into_inner();
                self.expr(next_pair(&mut inner, &location)?)
            }

            Rule::ternary => {
                let mut inner = pair.into_inner();
                let check = self.expr(next_pair(&mut inner, &location)?)?;
                match inner.next() {
                    None => Ok(check),
                    Some(then_pair) => {
                        let then_branch = self.expr(then_pair)?;
                        let else_branch = self.expr(next_pair(&mut inner, &location)?)?;
                        Ok(Expr::ternary(check, then_branch, else_branch).at(location))
                    }
                }
            }

            Rule::logical => self.pratt(
                &LOGICAL_PARSER,
                pair,
                &[BinaryFamily::Coalesce, BinaryFamily::Or, BinaryFamily::And],
            ),

            Rule::equality | Rule::exponent => self.chain(pair),

            Rule::arith => self.pratt(
                &ARITH_PARSER,
                pair,
                &[BinaryFamily::Sum, BinaryFamily::Product],
            ),

            Rule::unary => {
                let mut inner = pair.into_inner();
                let first = next_pair(&mut inner, &location)?;
                let op = match first.as_rule() {
                    Rule::not_op => UnaryOp::Not,
                    Rule::pos => UnaryOp::Plus,
                    Rule::neg => UnaryOp::Minus,
                    _ => return self.expr(first),
                };
                let operand = self.expr(next_pair(&mut inner, &location)?)?;
                Ok(Expr::unary(op, operand).at(self.location_of(&first)))
            }

            Rule::postfix => {
                let mut inner = pair.into_inner();
                let mut object = self.expr(next_pair(&mut inner, &location)?)?;
                for accessor in inner {
                    let accessor_location = self.location_of(&accessor);
                    let mut parts = accessor.clone().into_inner();
                    let key = next_pair(&mut parts, &accessor_location)?;
                    object = match accessor.as_rule() {
                        Rule::field_access => Expr::field(object, key.as_str()),
                        Rule::index_access => Expr::index(object, self.expr(key)?),
                        _ => return Err(self.unexpected(&accessor)),
                    }
                    .at(accessor_location);
                }
                Ok(object)
            }

            Rule::grouping => {
                let mut inner = pair.into_inner();
                let expr = self.expr(next_pair(&mut inner, &location)?)?;
                Ok(Expr::grouping(expr).at(location))
            }

            Rule::call => {
                let mut inner = pair.into_inner();
                let callee = next_pair(&mut inner, &location)?.as_str().to_string();
                let args = inner
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::call(callee, args).at(location))
            }

            Rule::number => Ok(Expr::number(pair.as_str()).at(location)),

            Rule::string => {
                let mut inner = pair.into_inner();
                let body = next_pair(&mut inner, &location)?;
                Ok(Expr::string(unescape(body.as_str(), &location)?).at(location))
            }

            Rule::keyword => {
                let keyword = match pair.as_str() {
                    "true" => Keyword::True,
                    "false" => Keyword::False,
                    "null" => Keyword::Null,
                    _ => return Err(self.unexpected(&pair)),
                };
                Ok(Expr::keyword(keyword).at(location))
            }

            Rule::identifier => Ok(Expr::ident(pair.as_str()).at(location)),

            _ => Err(self.unexpected(&pair)),
        }
    }
}

fn next_pair<'p>(
    pairs: &mut Pairs<'p, Rule>,
    parent: &Location,
) -> Result<Pair<'p, Rule>, ParseError> {
    pairs
        .next()
        .ok_or_else(|| ParseError::custom("missing expected pair in rule", parent.clone()))
}

/// Resolves backslash escapes. The grammar has already checked their shape.
fn unescape(body: &str, location: &Location) -> Result<String, ParseError> {
    let invalid = |what: &str| {
        ParseError::custom(format!("invalid escape sequence {what}"), location.clone())
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let high = hex4(&mut chars).ok_or_else(|| invalid("\\u"))?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    // Surrogate pairs arrive as two consecutive escapes.
                    let mut lookahead = chars.clone();
                    let low = match (lookahead.next(), lookahead.next()) {
                        (Some('\\'), Some('u')) => hex4(&mut lookahead),
                        _ => None,
                    }
                    .filter(|low| (0xDC00..0xE000).contains(low))
                    .ok_or_else(|| invalid(&format!("\\u{high:04x} (unpaired surrogate)")))?;
                    chars = lookahead;
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                let c = char::from_u32(code)
                    .ok_or_else(|| invalid(&format!("\\u{code:04x}")))?;
                out.push(c);
            }
            Some(other) => out.push(other),
            None => return Err(invalid("at end of string")),
        }
    }
    Ok(out)
}

fn hex4(chars: &mut core::str::Chars<'_>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}
