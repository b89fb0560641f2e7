//! The immutable expression model.
//!
//! Trees are built once by the query-building layer, handed to a formatter,
//! and discarded; nothing in this module mutates a tree after construction.

mod column;
mod expr;
mod stmt;

pub use column::Column;
pub use expr::{BinaryOp, ColumnRef, Expr, OrderSpec, UnaryOp};
pub use stmt::{
    Assignment, DeleteStatement, InsertStatement, Join, JoinKind, SelectItem, SelectQuery,
    Statement, TableRef, TableSource, UpdateStatement,
};
