//! Statement nodes: select, insert, update, delete.

use crate::ast::expr::{ColumnRef, Expr, OrderSpec};

/// A table reference, optionally schema-qualified and aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Schema name (optional).
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Alias (optional).
    pub alias: Option<String>,
}

impl TableRef {
    /// Create a table reference by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Qualify with a schema name.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Attach an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A FROM/JOIN source: a table or a derived (subquery) table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// A plain table reference.
    Table(TableRef),
    /// A derived table with a mandatory alias.
    Subquery {
        query: Box<SelectQuery>,
        alias: String,
    },
}

impl From<TableRef> for TableSource {
    fn from(table: TableRef) -> Self {
        Self::Table(table)
    }
}

impl From<&str> for TableSource {
    fn from(name: &str) -> Self {
        Self::Table(TableRef::new(name))
    }
}

impl From<String> for TableSource {
    fn from(name: String) -> Self {
        Self::Table(TableRef::new(name))
    }
}

/// One projected item of a select statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    /// Projected expression.
    pub expr: Expr,
    /// Output alias (optional).
    pub alias: Option<String>,
}

/// Join categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// SQL spelling of the join.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner join",
            Self::Left => "left join",
            Self::Right => "right join",
            Self::Full => "full join",
            Self::Cross => "cross join",
        }
    }
}

/// One JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join category.
    pub kind: JoinKind,
    /// Joined source.
    pub source: TableSource,
    /// ON condition; absent for cross joins.
    pub on: Option<Expr>,
}

/// A select statement.
///
/// Clause fields may be set in any order; the formatter always emits clauses
/// in the fixed standard order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    /// SELECT DISTINCT when true.
    pub distinct: bool,
    /// Projected items; empty means `*`.
    pub projection: Vec<SelectItem>,
    /// FROM source (optional).
    pub from: Option<TableSource>,
    /// JOIN clauses.
    pub joins: Vec<Join>,
    /// WHERE condition.
    pub filter: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderSpec>,
    /// Row limit.
    pub limit: Option<u64>,
    /// Row offset.
    pub offset: Option<u64>,
}

impl SelectQuery {
    /// Create a select over the given table.
    pub fn from(table: impl Into<TableRef>) -> Self {
        Self {
            from: Some(TableSource::Table(table.into())),
            ..Self::default()
        }
    }

    /// Create a select over an arbitrary source (e.g. a derived table).
    pub fn from_source(source: TableSource) -> Self {
        Self {
            from: Some(source),
            ..Self::default()
        }
    }

    /// Mark the select as DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Append a projected expression.
    pub fn item(mut self, expr: impl Into<Expr>) -> Self {
        self.projection.push(SelectItem {
            expr: expr.into(),
            alias: None,
        });
        self
    }

    /// Append a projected expression with an output alias.
    pub fn item_as(mut self, expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        self.projection.push(SelectItem {
            expr: expr.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Append a join.
    pub fn join(mut self, kind: JoinKind, source: impl Into<TableSource>, on: Expr) -> Self {
        self.joins.push(Join {
            kind,
            source: source.into(),
            on: Some(on),
        });
        self
    }

    /// Set the WHERE condition, ANDing with any existing one.
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Append a GROUP BY expression.
    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    /// Set the HAVING condition, ANDing with any existing one.
    pub fn having(mut self, condition: Expr) -> Self {
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Append an ORDER BY entry.
    pub fn order_by(mut self, spec: OrderSpec) -> Self {
        self.order_by.push(spec);
        self
    }

    /// Set the row limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// One column assignment of an insert or update statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Assigned column.
    pub column: ColumnRef,
    /// Assigned value expression.
    pub value: Expr,
}

/// An insert statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: TableRef,
    /// Column assignments; must be non-empty at formatting time.
    pub assignments: Vec<Assignment>,
}

impl InsertStatement {
    /// Create an insert into the given table.
    pub fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
        }
    }

    /// Assign a value to a column.
    pub fn set(mut self, column: impl Into<ColumnRef>, value: impl Into<Expr>) -> Self {
        self.assignments.push(Assignment {
            column: column.into(),
            value: value.into(),
        });
        self
    }
}

/// An update statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table.
    pub table: TableRef,
    /// Column assignments; must be non-empty at formatting time.
    pub assignments: Vec<Assignment>,
    /// WHERE condition.
    pub filter: Option<Expr>,
}

impl UpdateStatement {
    /// Create an update of the given table.
    pub fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            filter: None,
        }
    }

    /// Assign a value to a column.
    pub fn set(mut self, column: impl Into<ColumnRef>, value: impl Into<Expr>) -> Self {
        self.assignments.push(Assignment {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Set the WHERE condition, ANDing with any existing one.
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }
}

/// A delete statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Target table.
    pub table: TableRef,
    /// WHERE condition.
    pub filter: Option<Expr>,
}

impl DeleteStatement {
    /// Create a delete from the given table.
    pub fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            filter: None,
        }
    }

    /// Set the WHERE condition, ANDing with any existing one.
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }
}

/// Any formattable statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectQuery),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl From<SelectQuery> for Statement {
    fn from(q: SelectQuery) -> Self {
        Self::Select(q)
    }
}

impl From<InsertStatement> for Statement {
    fn from(s: InsertStatement) -> Self {
        Self::Insert(s)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(s: UpdateStatement) -> Self {
        Self::Update(s)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(s: DeleteStatement) -> Self {
        Self::Delete(s)
    }
}
