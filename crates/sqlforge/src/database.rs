//! Execution-layer seams.
//!
//! The core never talks to a backend directly; the connection layer supplies
//! a [`Database`] handle and [`PreparedStatement`] handles, and this module
//! provides the scoped helpers that turn an expression tree into an executed
//! statement: format through the active dialect, prepare, run a callback,
//! and release the statement on every exit path.

use std::sync::Arc;

use async_trait::async_trait;
use futures_core::future::BoxFuture;

use crate::ast::{Column, InsertStatement, Statement};
use crate::dialect::Dialect;
use crate::error::SqlResult;
use crate::format::{format_statement, FormatOptions, FormattedSql};
use crate::value::Value;

/// A connection-scoped database handle supplied by the execution layer.
#[async_trait]
pub trait Database: Send + Sync {
    /// The dialect active for this connection.
    fn dialect(&self) -> Arc<dyn Dialect>;

    /// Per-connection formatting configuration.
    fn format_options(&self) -> FormatOptions {
        FormatOptions::default()
    }

    /// Prepare a statement through the backend's standard mechanism.
    async fn prepare(
        &self,
        sql: &str,
        auto_generated_keys: bool,
    ) -> SqlResult<Box<dyn PreparedStatement>>;
}

/// A prepared-statement handle owned by the execution layer.
///
/// The handle's scope is strictly the duration of the callback passed to
/// [`with_prepared_statement`]; `close` is called exactly once on every exit
/// path before the helper returns or propagates.
#[async_trait]
pub trait PreparedStatement: Send {
    /// Bind arguments and execute, returning the affected row count.
    async fn execute(&mut self, params: &[Value]) -> SqlResult<u64>;

    /// Rows of the generated-keys result set of an executed insert.
    async fn generated_keys(&mut self) -> SqlResult<Vec<Vec<Value>>>;

    /// Release the statement.
    async fn close(&mut self) -> SqlResult<()>;
}

/// Format a statement with the database's active dialect and options.
pub fn format_for(database: &dyn Database, statement: &Statement) -> SqlResult<FormattedSql> {
    let options = database.format_options();
    let dialect = database.dialect();
    let formatter = dialect.create_formatter(database, options);
    format_statement(formatter.as_ref(), statement, options)
}

/// Format `statement`, acquire a prepared statement scoped to this call,
/// invoke `callback` with it and the bound arguments, and return the
/// callback's result.
///
/// The statement is closed on every exit path: after a normal return and
/// after a callback failure, before this function returns or propagates. A
/// formatting or preparation failure propagates with nothing left to
/// release.
pub async fn with_prepared_statement<T, F>(
    database: &dyn Database,
    statement: &Statement,
    auto_generated_keys: bool,
    callback: F,
) -> SqlResult<T>
where
    F: for<'a> FnOnce(&'a mut dyn PreparedStatement, &'a [Value]) -> BoxFuture<'a, SqlResult<T>>,
{
    let dialect = database.dialect();
    let formatted = format_for(database, statement)?;
    let mut prepared = dialect
        .prepare(database, &formatted.sql, auto_generated_keys)
        .await?;

    let result = callback(prepared.as_mut(), &formatted.params).await;
    let closed = prepared.close().await;

    match result {
        Ok(value) => {
            closed?;
            Ok(value)
        }
        Err(err) => {
            // The callback's failure is the primary error.
            if let Err(close_err) = closed {
                tracing::warn!(error = %close_err, "failed to close statement after callback error");
            }
            Err(err)
        }
    }
}

/// Execute a statement and return the affected row count.
pub async fn execute(database: &dyn Database, statement: &Statement) -> SqlResult<u64> {
    with_prepared_statement(database, statement, false, |prepared, params| {
        Box::pin(async move { prepared.execute(params).await })
    })
    .await
}

/// Execute an insert and return the database-generated key for the table's
/// primary-key column.
pub async fn insert_and_generate_key(
    database: &dyn Database,
    insert: &InsertStatement,
    primary_key: Option<&Column>,
) -> SqlResult<Value> {
    let dialect = database.dialect();
    let primary_key = primary_key.cloned();
    let statement = Statement::Insert(insert.clone());
    with_prepared_statement(database, &statement, true, move |prepared, params| {
        Box::pin(async move {
            prepared.execute(params).await?;
            dialect
                .extract_generated_key(prepared, primary_key.as_ref())
                .await
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Column, Expr, InsertStatement, SelectQuery};
    use crate::error::SqlError;
    use crate::testing::FakeDatabase;
    use crate::value::{BigIntCodec, Value};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn statement_is_closed_after_success() {
        let db = FakeDatabase::new();
        let statement = Statement::from(
            SelectQuery::from("t_employee").filter(Expr::column("salary").gt(5000)),
        );
        let rows = execute(&db, &statement).await.unwrap();
        assert_eq!(rows, 1);
        assert_eq!(db.closes.load(Ordering::SeqCst), 1);
        assert_eq!(
            db.last_bound.lock().unwrap().as_slice(),
            &[Value::Int(5000)]
        );
    }

    #[tokio::test]
    async fn statement_is_closed_after_callback_failure() {
        let db = FakeDatabase::new();
        let statement = Statement::from(SelectQuery::from("t_employee"));
        let result: SqlResult<u64> =
            with_prepared_statement(&db, &statement, false, |_prepared, _params| {
                Box::pin(async move { Err(SqlError::execution("boom")) })
            })
            .await;
        assert!(matches!(result, Err(SqlError::Execution(_))));
        assert_eq!(db.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn formatting_failure_acquires_nothing() {
        let db = FakeDatabase::new();
        // Generic dialect has no pagination, so formatting fails up front.
        let statement = Statement::from(SelectQuery::from("t_employee").limit(10));
        let result = execute(&db, &statement).await;
        assert!(matches!(result, Err(SqlError::Unsupported { .. })));
        assert_eq!(db.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn insert_returns_generated_key() {
        let mut db = FakeDatabase::new();
        db.generated_keys = vec![vec![Value::Int(7)]];
        let insert = InsertStatement::new("t_employee")
            .set("name", "tom")
            .set("salary", 5000i64);
        let pk = Column::new("t_employee", "id", std::sync::Arc::new(BigIntCodec)).primary_key();
        let key = insert_and_generate_key(&db, &insert, Some(&pk)).await.unwrap();
        assert_eq!(key, Value::BigInt(7));
        assert_eq!(db.closes.load(Ordering::SeqCst), 1);
        assert_eq!(
            db.last_sql.lock().unwrap().as_str(),
            "insert into t_employee (name, salary) values (?, ?)"
        );
    }

    #[tokio::test]
    async fn insert_without_primary_key_fails_and_still_closes() {
        let mut db = FakeDatabase::new();
        db.generated_keys = vec![vec![Value::Int(7)]];
        let insert = InsertStatement::new("t_note").set("body", "hello");
        let err = insert_and_generate_key(&db, &insert, None).await.unwrap_err();
        assert!(matches!(err, SqlError::NoPrimaryKey));
        assert_eq!(db.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn format_for_uses_connection_options() {
        let mut db = FakeDatabase::new();
        db.options = FormatOptions::beautified();
        let statement = Statement::from(
            SelectQuery::from("t_employee").filter(Expr::column("name").eq("tom")),
        );
        let formatted = format_for(&db, &statement).unwrap();
        assert_eq!(formatted.sql, "select *\nfrom t_employee\nwhere name = ?");
        assert_eq!(formatted.params, vec![Value::Text("tom".into())]);
    }
}
