//! SQL dialect support.
//!
//! A [`Dialect`] is a stateless strategy describing one backend's deviations
//! from generic SQL generation. Every operation has a generic default, so a
//! backend overrides only the seams where its syntax or mechanics actually
//! diverge; most dialects swap the formatter and leave statement preparation
//! and key extraction untouched.

mod registry;

pub use registry::{detect_dialect, DialectRegistration, DialectRegistry};

use async_trait::async_trait;

use crate::ast::Column;
use crate::database::{Database, PreparedStatement};
use crate::error::{SqlError, SqlResult};
use crate::format::{FormatOptions, Formatter, GenericFormatter};
use crate::value::Value;

/// Backend-specific overrides for SQL generation and statement mechanics.
///
/// Dialects are resolved once per database configuration and shared read-only
/// across connections; implementations must not carry per-call state.
#[async_trait]
pub trait Dialect: std::fmt::Debug + Send + Sync {
    /// Name of the dialect, used in resolution and error messages.
    fn name(&self) -> &'static str;

    /// Produce the formatter used for this dialect's SQL generation.
    ///
    /// The default returns the generic standard-SQL formatter; a backend
    /// returns its own [`Formatter`] overriding individual rendering rules.
    /// The database handle supplies per-connection context; `options` control
    /// whitespace only. Always succeeds.
    fn create_formatter(
        &self,
        _database: &dyn Database,
        _options: FormatOptions,
    ) -> Box<dyn Formatter> {
        Box::new(GenericFormatter)
    }

    /// Acquire a prepared statement for already-formatted SQL.
    ///
    /// The default delegates to the database handle's standard preparation
    /// mechanism. A dialect whose backend cannot prepare through it (missing
    /// generated-keys metadata, backend-specific flags) overrides this with
    /// an equivalent path.
    async fn prepare(
        &self,
        database: &dyn Database,
        sql: &str,
        auto_generated_keys: bool,
    ) -> SqlResult<Box<dyn PreparedStatement>> {
        database.prepare(sql, auto_generated_keys).await
    }

    /// Extract the generated primary-key value from an executed insert.
    ///
    /// Default algorithm: read the statement's generated-keys rows; with no
    /// row the key is absent; without a primary-key column the table cannot
    /// yield one; otherwise column 1 is decoded through the primary key's
    /// codec, and a null decode is an error. Backends with different insert
    /// mechanics (client-generated keys, RETURNING clauses) override this
    /// entirely and may relax the primary-key precondition.
    async fn extract_generated_key(
        &self,
        statement: &mut dyn PreparedStatement,
        primary_key: Option<&Column>,
    ) -> SqlResult<Value> {
        let rows = statement.generated_keys().await?;
        let Some(row) = rows.first() else {
            return Err(SqlError::GeneratedKeyAbsent);
        };
        let Some(primary_key) = primary_key else {
            return Err(SqlError::NoPrimaryKey);
        };
        let raw = row.first().ok_or(SqlError::GeneratedKeyAbsent)?;
        let decoded = primary_key.codec().decode(raw)?;
        if decoded.is_null() {
            return Err(SqlError::NullGeneratedKey);
        }
        Ok(decoded)
    }
}

/// The no-override dialect: generic formatter, standard preparation, default
/// key extraction. Returned by resolution when no dialect is registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

#[async_trait]
impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
