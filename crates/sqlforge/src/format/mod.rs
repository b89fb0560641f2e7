//! Tree-walking SQL formatter.
//!
//! [`Formatter`] carries one method per node-category rendering rule, each
//! with a generic standard-SQL default body, so a dialect formatter overrides
//! only the rules its backend actually changes (placeholder style, pagination
//! syntax, identifier quoting) and inherits everything else. Recursion goes
//! through `self`, so an overridden rule is honored wherever the node appears
//! in the tree.
//!
//! Rendering is deterministic and side-effect free: clauses are emitted in a
//! fixed, variant-specific order regardless of construction order, and every
//! literal becomes a placeholder in the text plus an entry appended to the
//! parameter list, never inlined SQL.

mod writer;

pub use writer::{FormatOptions, FormattedSql, SqlWriter};

use crate::ast::{
    Assignment, BinaryOp, ColumnRef, DeleteStatement, Expr, InsertStatement, Join, OrderSpec,
    SelectQuery, Statement, TableRef, TableSource, UnaryOp, UpdateStatement,
};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// Serializes an expression tree into SQL text plus positional parameters.
///
/// All methods have generic standard-SQL defaults; [`GenericFormatter`] is
/// the no-override implementation.
pub trait Formatter {
    /// Dialect name used in unsupported-feature errors.
    fn dialect_name(&self) -> &'static str {
        "generic"
    }

    /// Dispatch on the statement variant.
    fn write_statement(&self, w: &mut SqlWriter, statement: &Statement) -> SqlResult<()> {
        match statement {
            Statement::Select(q) => self.write_select(w, q),
            Statement::Insert(s) => self.write_insert(w, s),
            Statement::Update(s) => self.write_update(w, s),
            Statement::Delete(s) => self.write_delete(w, s),
        }
    }

    /// Dispatch on the expression variant.
    fn write_expr(&self, w: &mut SqlWriter, expr: &Expr) -> SqlResult<()> {
        match expr {
            Expr::Column(c) => self.write_column_ref(w, c),
            Expr::Literal(v) => self.write_literal(w, v),
            Expr::Unary { op, operand } => self.write_unary(w, *op, operand),
            Expr::Binary { left, op, right } => self.write_binary(w, left, *op, right),
            Expr::Function { name, args } => self.write_function(w, name, args),
            Expr::IsNull { operand, negated } => self.write_is_null(w, operand, *negated),
            Expr::InList {
                operand,
                list,
                negated,
            } => self.write_in_list(w, operand, list, *negated),
            Expr::Between {
                operand,
                low,
                high,
                negated,
            } => self.write_between(w, operand, low, high, *negated),
            Expr::Subquery(q) => self.write_subquery(w, q),
        }
    }

    /// Render a literal: a placeholder in the text plus an appended param.
    fn write_literal(&self, w: &mut SqlWriter, value: &Value) -> SqlResult<()> {
        self.write_placeholder(w, value)
    }

    /// Placeholder style. Generic SQL uses `?`.
    fn write_placeholder(&self, w: &mut SqlWriter, value: &Value) -> SqlResult<()> {
        w.add_param(value.clone());
        w.push("?");
        Ok(())
    }

    /// Identifier rendering. Generic default is pass-through, no quoting.
    fn write_identifier(&self, w: &mut SqlWriter, ident: &str) -> SqlResult<()> {
        w.push(ident);
        Ok(())
    }

    /// Render a column reference, table-qualified when a table is present.
    fn write_column_ref(&self, w: &mut SqlWriter, column: &ColumnRef) -> SqlResult<()> {
        if let Some(table) = &column.table {
            self.write_identifier(w, table)?;
            w.push(".");
        }
        self.write_identifier(w, &column.name)
    }

    /// Render a unary expression.
    fn write_unary(&self, w: &mut SqlWriter, op: UnaryOp, operand: &Expr) -> SqlResult<()> {
        match op {
            UnaryOp::Not => w.push("not "),
            UnaryOp::Neg => w.push("-"),
        }
        // A nested unary operand must be wrapped: `--x` opens a line comment.
        let parens = matches!(
            operand,
            Expr::Unary { .. }
                | Expr::Binary { .. }
                | Expr::IsNull { .. }
                | Expr::InList { .. }
                | Expr::Between { .. }
        );
        if parens {
            w.push("(");
            self.write_expr(w, operand)?;
            w.push(")");
        } else {
            self.write_expr(w, operand)?;
        }
        Ok(())
    }

    /// Render a binary expression, parenthesizing operands by precedence.
    fn write_binary(
        &self,
        w: &mut SqlWriter,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> SqlResult<()> {
        self.write_operand(w, left, op.precedence(), false)?;
        w.push(" ");
        w.push(op.as_str());
        w.push(" ");
        self.write_operand(w, right, op.precedence(), true)
    }

    /// Render one operand of an enclosing operator, adding parentheses when
    /// the operand binds looser than its parent (or equally, on the right).
    fn write_operand(
        &self,
        w: &mut SqlWriter,
        operand: &Expr,
        parent_precedence: u8,
        is_right: bool,
    ) -> SqlResult<()> {
        let parens = match operand {
            Expr::Binary { op, .. } => {
                let p = op.precedence();
                p < parent_precedence || (is_right && p == parent_precedence)
            }
            _ => false,
        };
        if parens {
            w.push("(");
            self.write_expr(w, operand)?;
            w.push(")");
        } else {
            self.write_expr(w, operand)?;
        }
        Ok(())
    }

    /// Render a function call.
    fn write_function(&self, w: &mut SqlWriter, name: &str, args: &[Expr]) -> SqlResult<()> {
        if name.is_empty() {
            return Err(SqlError::malformed("function call with an empty name"));
        }
        w.push(name);
        w.push("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_expr(w, arg)?;
        }
        w.push(")");
        Ok(())
    }

    /// Render an IS NULL / IS NOT NULL check.
    fn write_is_null(&self, w: &mut SqlWriter, operand: &Expr, negated: bool) -> SqlResult<()> {
        self.write_operand(w, operand, 3, false)?;
        w.push(if negated { " is not null" } else { " is null" });
        Ok(())
    }

    /// Render an IN / NOT IN list.
    fn write_in_list(
        &self,
        w: &mut SqlWriter,
        operand: &Expr,
        list: &[Expr],
        negated: bool,
    ) -> SqlResult<()> {
        if list.is_empty() {
            return Err(SqlError::malformed("in-list with no values"));
        }
        self.write_operand(w, operand, 3, false)?;
        w.push(if negated { " not in (" } else { " in (" });
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_expr(w, item)?;
        }
        w.push(")");
        Ok(())
    }

    /// Render a BETWEEN / NOT BETWEEN range check.
    fn write_between(
        &self,
        w: &mut SqlWriter,
        operand: &Expr,
        low: &Expr,
        high: &Expr,
        negated: bool,
    ) -> SqlResult<()> {
        self.write_operand(w, operand, 3, false)?;
        w.push(if negated { " not between " } else { " between " });
        self.write_operand(w, low, 3, false)?;
        w.push(" and ");
        self.write_operand(w, high, 3, false)
    }

    /// Render a parenthesized subquery, indenting its clauses one level.
    fn write_subquery(&self, w: &mut SqlWriter, query: &SelectQuery) -> SqlResult<()> {
        w.push("(");
        w.indent();
        self.write_select(w, query)?;
        w.dedent();
        w.push(")");
        Ok(())
    }

    /// Render a table reference with optional schema and alias.
    fn write_table_ref(&self, w: &mut SqlWriter, table: &TableRef) -> SqlResult<()> {
        if let Some(schema) = &table.schema {
            self.write_identifier(w, schema)?;
            w.push(".");
        }
        self.write_identifier(w, &table.name)?;
        if let Some(alias) = &table.alias {
            w.push(" ");
            self.write_identifier(w, alias)?;
        }
        Ok(())
    }

    /// Render a FROM/JOIN source.
    fn write_table_source(&self, w: &mut SqlWriter, source: &TableSource) -> SqlResult<()> {
        match source {
            TableSource::Table(t) => self.write_table_ref(w, t),
            TableSource::Subquery { query, alias } => {
                self.write_subquery(w, query)?;
                w.push(" ");
                self.write_identifier(w, alias)
            }
        }
    }

    /// Render one JOIN clause.
    fn write_join(&self, w: &mut SqlWriter, join: &Join) -> SqlResult<()> {
        w.push(join.kind.as_str());
        w.push(" ");
        self.write_table_source(w, &join.source)?;
        if let Some(on) = &join.on {
            w.push(" on ");
            self.write_expr(w, on)?;
        }
        Ok(())
    }

    /// Render one ORDER BY entry.
    fn write_order(&self, w: &mut SqlWriter, order: &OrderSpec) -> SqlResult<()> {
        self.write_expr(w, &order.expr)?;
        if order.descending {
            w.push(" desc");
        }
        Ok(())
    }

    /// Pagination rendering.
    ///
    /// Standard SQL has no portable limit/offset spelling, so the generic
    /// default fails with an unsupported-feature error; dialects with
    /// pagination syntax override this. Called only when at least one of
    /// `limit`/`offset` is present.
    fn write_limit_offset(
        &self,
        _w: &mut SqlWriter,
        _limit: Option<u64>,
        _offset: Option<u64>,
    ) -> SqlResult<()> {
        Err(SqlError::unsupported(
            "limit/offset pagination",
            self.dialect_name(),
        ))
    }

    /// Render a select statement in fixed clause order: projection, from,
    /// joins, where, group by, having, order by, limit/offset.
    fn write_select(&self, w: &mut SqlWriter, query: &SelectQuery) -> SqlResult<()> {
        w.push("select ");
        if query.distinct {
            w.push("distinct ");
        }
        if query.projection.is_empty() {
            w.push("*");
        } else {
            for (i, item) in query.projection.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                self.write_expr(w, &item.expr)?;
                if let Some(alias) = &item.alias {
                    w.push(" as ");
                    self.write_identifier(w, alias)?;
                }
            }
        }
        if let Some(from) = &query.from {
            w.clause_break();
            w.push("from ");
            self.write_table_source(w, from)?;
        }
        for join in &query.joins {
            w.clause_break();
            self.write_join(w, join)?;
        }
        if let Some(filter) = &query.filter {
            w.clause_break();
            w.push("where ");
            self.write_expr(w, filter)?;
        }
        if !query.group_by.is_empty() {
            w.clause_break();
            w.push("group by ");
            for (i, expr) in query.group_by.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                self.write_expr(w, expr)?;
            }
        }
        if let Some(having) = &query.having {
            w.clause_break();
            w.push("having ");
            self.write_expr(w, having)?;
        }
        if !query.order_by.is_empty() {
            w.clause_break();
            w.push("order by ");
            for (i, order) in query.order_by.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                self.write_order(w, order)?;
            }
        }
        if query.limit.is_some() || query.offset.is_some() {
            w.clause_break();
            self.write_limit_offset(w, query.limit, query.offset)?;
        }
        Ok(())
    }

    /// Render the column assignments of an insert/update.
    fn write_assignments(&self, w: &mut SqlWriter, assignments: &[Assignment]) -> SqlResult<()> {
        for (i, assignment) in assignments.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_column_ref(w, &assignment.column)?;
            w.push(" = ");
            self.write_expr(w, &assignment.value)?;
        }
        Ok(())
    }

    /// Render an insert statement.
    fn write_insert(&self, w: &mut SqlWriter, statement: &InsertStatement) -> SqlResult<()> {
        if statement.assignments.is_empty() {
            return Err(SqlError::malformed("insert with no column assignments"));
        }
        w.push("insert into ");
        self.write_table_ref(w, &statement.table)?;
        w.push(" (");
        for (i, assignment) in statement.assignments.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_column_ref(w, &assignment.column)?;
        }
        w.push(")");
        w.clause_break();
        w.push("values (");
        for (i, assignment) in statement.assignments.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_expr(w, &assignment.value)?;
        }
        w.push(")");
        Ok(())
    }

    /// Render an update statement.
    fn write_update(&self, w: &mut SqlWriter, statement: &UpdateStatement) -> SqlResult<()> {
        if statement.assignments.is_empty() {
            return Err(SqlError::malformed("update with no column assignments"));
        }
        w.push("update ");
        self.write_table_ref(w, &statement.table)?;
        w.clause_break();
        w.push("set ");
        self.write_assignments(w, &statement.assignments)?;
        if let Some(filter) = &statement.filter {
            w.clause_break();
            w.push("where ");
            self.write_expr(w, filter)?;
        }
        Ok(())
    }

    /// Render a delete statement.
    fn write_delete(&self, w: &mut SqlWriter, statement: &DeleteStatement) -> SqlResult<()> {
        w.push("delete from ");
        self.write_table_ref(w, &statement.table)?;
        if let Some(filter) = &statement.filter {
            w.clause_break();
            w.push("where ");
            self.write_expr(w, filter)?;
        }
        Ok(())
    }
}

/// The no-override standard-SQL formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFormatter;

impl Formatter for GenericFormatter {}

/// Format a statement with the given formatter and options.
///
/// Formatting is pure and re-entrant over immutable input; the same tree,
/// formatter, and options always yield byte-identical output.
pub fn format_statement(
    formatter: &dyn Formatter,
    statement: &Statement,
    options: FormatOptions,
) -> SqlResult<FormattedSql> {
    let mut writer = SqlWriter::new(options);
    formatter.write_statement(&mut writer, statement)?;
    let formatted = writer.finish();
    tracing::debug!(
        dialect = formatter.dialect_name(),
        sql = %formatted.sql,
        params = formatted.params.len(),
        "formatted statement"
    );
    Ok(formatted)
}

#[cfg(test)]
mod tests;
