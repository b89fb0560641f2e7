//! Schema-bound columns.

use std::sync::Arc;

use crate::ast::expr::{ColumnRef, Expr};
use crate::value::SqlCodec;

/// A table-qualified column bound to a value codec.
///
/// Unlike [`ColumnRef`], which is a pure name inside an expression tree, a
/// `Column` also knows how to convert values for its SQL type and whether it
/// is the table's primary key. Generated-key extraction decodes through the
/// primary-key column's codec.
#[derive(Debug, Clone)]
pub struct Column {
    table: String,
    name: String,
    codec: Arc<dyn SqlCodec>,
    primary_key: bool,
}

impl Column {
    /// Create a column bound to the given codec.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        codec: Arc<dyn SqlCodec>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            codec,
            primary_key: false,
        }
    }

    /// Mark this column as the table's primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value codec for this column's SQL type.
    pub fn codec(&self) -> &dyn SqlCodec {
        self.codec.as_ref()
    }

    /// Whether this column is a primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Qualified reference to this column for use in expression trees.
    pub fn column_ref(&self) -> ColumnRef {
        ColumnRef::qualified(self.table.as_str(), self.name.as_str())
    }

    /// Qualified reference to this column as an expression node.
    pub fn expr(&self) -> Expr {
        Expr::Column(self.column_ref())
    }
}
