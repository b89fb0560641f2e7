//! Scalar expression nodes and operators.

use crate::ast::stmt::SelectQuery;
use crate::value::Value;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Like,
    NotLike,
    Concat,
}

impl BinaryOp {
    /// SQL spelling of the operator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Like => "like",
            Self::NotLike => "not like",
            Self::Concat => "||",
        }
    }

    /// Precedence of the operator (higher = binds tighter).
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Like | Self::NotLike => 4,
            Self::Add | Self::Sub | Self::Concat => 8,
            Self::Mul | Self::Div | Self::Mod => 9,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

/// A column reference, optionally qualified with a table name or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Table name or alias (optional).
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Create an unqualified column reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Create a table-qualified column reference.
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A scalar SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference.
    Column(ColumnRef),

    /// A literal value; always formatted as a placeholder plus a parameter,
    /// never inlined into the SQL text.
    Literal(Value),

    /// A unary expression.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// A binary expression.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// A function call.
    Function { name: String, args: Vec<Expr> },

    /// IS NULL / IS NOT NULL.
    IsNull { operand: Box<Expr>, negated: bool },

    /// IN list / NOT IN list.
    InList {
        operand: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },

    /// BETWEEN / NOT BETWEEN.
    Between {
        operand: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// A scalar subquery.
    Subquery(Box<SelectQuery>),
}

impl Expr {
    /// Create an unqualified column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Create a table-qualified column reference.
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::qualified(table, name))
    }

    /// Create a literal value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a function call.
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    /// Create a scalar subquery expression.
    pub fn subquery(query: SelectQuery) -> Self {
        Self::Subquery(Box::new(query))
    }

    fn binary(self, op: BinaryOp, right: impl Into<Expr>) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right.into()),
        }
    }

    /// self = other
    pub fn eq(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Eq, other)
    }

    /// self <> other
    pub fn ne(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::NotEq, other)
    }

    /// self > other
    pub fn gt(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Gt, other)
    }

    /// self >= other
    pub fn gte(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::GtEq, other)
    }

    /// self < other
    pub fn lt(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Lt, other)
    }

    /// self <= other
    pub fn lte(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::LtEq, other)
    }

    /// self like pattern
    pub fn like(self, pattern: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Like, pattern)
    }

    /// self not like pattern
    pub fn not_like(self, pattern: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::NotLike, pattern)
    }

    /// self and other
    pub fn and(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::And, other)
    }

    /// self or other
    pub fn or(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Or, other)
    }

    /// self + other
    pub fn add(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Add, other)
    }

    /// self - other
    pub fn sub(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Sub, other)
    }

    /// self * other
    pub fn mul(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Mul, other)
    }

    /// self / other
    pub fn div(self, other: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Div, other)
    }

    /// not (self)
    pub fn not(self) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// -self
    pub fn neg(self) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(self),
        }
    }

    /// self is null
    pub fn is_null(self) -> Self {
        Self::IsNull {
            operand: Box::new(self),
            negated: false,
        }
    }

    /// self is not null
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            operand: Box::new(self),
            negated: true,
        }
    }

    /// self in (values...)
    pub fn in_list(self, list: Vec<Expr>) -> Self {
        Self::InList {
            operand: Box::new(self),
            list,
            negated: false,
        }
    }

    /// self not in (values...)
    pub fn not_in(self, list: Vec<Expr>) -> Self {
        Self::InList {
            operand: Box::new(self),
            list,
            negated: true,
        }
    }

    /// self between low and high
    pub fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Self {
        Self::Between {
            operand: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    /// self not between low and high
    pub fn not_between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Self {
        Self::Between {
            operand: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        }
    }

    /// Ascending order spec over this expression.
    pub fn asc(self) -> OrderSpec {
        OrderSpec {
            expr: self,
            descending: false,
        }
    }

    /// Descending order spec over this expression.
    pub fn desc(self) -> OrderSpec {
        OrderSpec {
            expr: self,
            descending: true,
        }
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl From<ColumnRef> for Expr {
    fn from(c: ColumnRef) -> Self {
        Self::Column(c)
    }
}

macro_rules! literal_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Expr {
                fn from(v: $t) -> Self {
                    Self::Literal(v.into())
                }
            }
        )*
    };
}

literal_from!(bool, i16, i32, i64, f32, f64, &str, String);

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    /// Ordered expression.
    pub expr: Expr,
    /// Descending when true; ascending otherwise.
    pub descending: bool,
}
