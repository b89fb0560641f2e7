//! # sqlforge
//!
//! The SQL-generation core of a database-access toolkit: an immutable, typed
//! expression model, a dialect-aware tree-walking formatter that produces SQL
//! text plus positionally-bound arguments, and the seams a backend crate
//! implements to override generation behavior without touching the generic
//! engine.
//!
//! ## Features
//!
//! - **Typed expression trees**: statements are immutable node trees, built
//!   once and formatted without mutation
//! - **No string splicing**: every literal becomes a placeholder plus an
//!   appended parameter, in emission order
//! - **Dialect seams, not subclassing**: one formatter method per rendering
//!   rule, each with a generic default; a dialect overrides only what its
//!   backend changes
//! - **Exactly-one resolution**: zero registered dialects fall back to the
//!   generic one, one wins, two or more fail naming every candidate
//! - **Scoped statement release**: prepared statements acquired for a
//!   callback are closed on every exit path
//!
//! ## Formatting
//!
//! ```ignore
//! use sqlforge::{Expr, GenericFormatter, SelectQuery, format_statement, FormatOptions};
//!
//! let query = SelectQuery::from("t_employee")
//!     .filter(Expr::column("salary").gt(5000));
//!
//! let out = format_statement(&GenericFormatter, &query.into(), FormatOptions::default())?;
//! assert_eq!(out.sql, "select * from t_employee where salary > ?");
//! ```
//!
//! ## Execution seams
//!
//! ```ignore
//! use sqlforge::{insert_and_generate_key, InsertStatement};
//!
//! let insert = InsertStatement::new("t_employee")
//!     .set("name", "tom")
//!     .set("salary", 5000i64);
//!
//! let id = insert_and_generate_key(&db, &insert, Some(&id_column)).await?;
//! ```

pub mod ast;
pub mod database;
pub mod dialect;
pub mod error;
pub mod format;
pub mod value;

pub use ast::{
    Assignment, BinaryOp, Column, ColumnRef, DeleteStatement, Expr, InsertStatement, Join,
    JoinKind, OrderSpec, SelectItem, SelectQuery, Statement, TableRef, TableSource, UnaryOp,
    UpdateStatement,
};
pub use database::{
    execute, format_for, insert_and_generate_key, with_prepared_statement, Database,
    PreparedStatement,
};
pub use dialect::{
    detect_dialect, Dialect, DialectRegistration, DialectRegistry, GenericDialect,
};
pub use error::{SqlError, SqlResult};
pub use format::{
    format_statement, FormatOptions, FormattedSql, Formatter, GenericFormatter, SqlWriter,
};
pub use value::{
    BigIntCodec, BooleanCodec, DoubleCodec, IntCodec, JsonCodec, SqlCodec, TextCodec,
    TimestampCodec, UuidCodec, Value,
};

#[cfg(feature = "decimal")]
pub use value::DecimalCodec;

// Re-export inventory so dialect crates can submit registrations.
pub use inventory;

#[cfg(test)]
mod testing;
