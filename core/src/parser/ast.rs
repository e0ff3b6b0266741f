use core::fmt;
use core::ops::Range;

/// Byte range of a node in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span(start..end)
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Span::new(s.start(), s.end())
    }
}

/// Where a node starts. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Location {
    pub fn new(line: usize, column: usize, span: Span) -> Self {
        Self { line, column, span }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@ line {} col {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Operator families. Operators in the same family share a precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFamily {
    Coalesce,
    Or,
    And,
    Equality,
    Sum,
    Product,
    Exponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Coalesce,
}

impl BinaryOp {
    pub fn family(self) -> BinaryFamily {
        match self {
            BinaryOp::Add | BinaryOp::Sub => BinaryFamily::Sum,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => BinaryFamily::Product,
            BinaryOp::Pow => BinaryFamily::Exponent,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => BinaryFamily::Equality,
            BinaryOp::And => BinaryFamily::And,
            BinaryOp::Or => BinaryFamily::Or,
            BinaryOp::Coalesce => BinaryFamily::Coalesce,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Coalesce => "??",
        }
    }
}

/// A node of the syntax tree.
///
/// Binary and unary nodes carry the location of their operator; every other
/// node carries the location of its first token. Nodes built by hand may have
/// no location at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Keyword(Keyword),
    /// Numeric literal, kept as written.
    Number(String),
    /// String literal, escapes already resolved.
    Str(String),
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        check: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    /// `object.key`
    Field {
        object: Box<Expr>,
        key: String,
    },
    /// `object[key]`
    Index {
        object: Box<Expr>,
        key: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Self::new(ExprKind::Keyword(keyword))
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(ExprKind::Number(text.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(text.into()))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Ident(name.into()))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn ternary(check: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::new(ExprKind::Ternary {
            check: Box::new(check),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn grouping(inner: Expr) -> Self {
        Self::new(ExprKind::Grouping(Box::new(inner)))
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: callee.into(),
            args,
        })
    }

    pub fn field(object: Expr, key: impl Into<String>) -> Self {
        Self::new(ExprKind::Field {
            object: Box::new(object),
            key: key.into(),
        })
    }

    pub fn index(object: Expr, key: Expr) -> Self {
        Self::new(ExprKind::Index {
            object: Box::new(object),
            key: Box::new(key),
        })
    }
}

/// Renders the tree back to source text. Groupings are kept, so parsing the
/// output yields the same tree shape.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Keyword(k) => write!(f, "{}", k.as_str()),
            ExprKind::Number(text) => write!(f, "{text}"),
            ExprKind::Str(s) => write!(f, "{}", quote(s)),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Unary { op, operand } => write!(f, "{}{operand}", op.as_str()),
            ExprKind::Binary { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_str())
            }
            ExprKind::Ternary {
                check,
                then_branch,
                else_branch,
            } => write!(f, "{check} ? {then_branch} : {else_branch}"),
            ExprKind::Grouping(inner) => write!(f, "({inner})"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            ExprKind::Field { object, key } => write!(f, "{object}.{key}"),
            ExprKind::Index { object, key } => write!(f, "{object}[{key}]"),
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
