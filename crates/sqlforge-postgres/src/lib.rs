//! PostgreSQL dialect for sqlforge.
//!
//! Overrides the formatting rules where Postgres diverges from generic SQL:
//! `$n` placeholders, `limit`/`offset` pagination, and identifier quoting
//! for reserved words and non-lowercase names. Statement preparation and
//! generated-key extraction keep the generic defaults.
//!
//! Depending on this crate advertises the dialect for discovery; a process
//! linking exactly one dialect crate resolves to it without configuration.

use std::sync::Arc;

use sqlforge::{
    Dialect, DialectRegistration, Database, FormatOptions, Formatter, SqlResult, SqlWriter, Value,
};

/// The PostgreSQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn create_formatter(
        &self,
        _database: &dyn Database,
        _options: FormatOptions,
    ) -> Box<dyn Formatter> {
        Box::new(PostgresFormatter)
    }
}

/// Formatter with Postgres spellings; every unlisted rule is inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresFormatter;

impl Formatter for PostgresFormatter {
    fn dialect_name(&self) -> &'static str {
        "postgres"
    }

    fn write_placeholder(&self, w: &mut SqlWriter, value: &Value) -> SqlResult<()> {
        let position = w.add_param(value.clone());
        w.push("$");
        w.push(&position.to_string());
        Ok(())
    }

    fn write_identifier(&self, w: &mut SqlWriter, ident: &str) -> SqlResult<()> {
        if needs_quoting(ident) {
            w.push("\"");
            w.push(&ident.replace('"', "\"\""));
            w.push("\"");
        } else {
            w.push(ident);
        }
        Ok(())
    }

    fn write_limit_offset(
        &self,
        w: &mut SqlWriter,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> SqlResult<()> {
        if let Some(limit) = limit {
            w.push("limit ");
            w.push(&limit.to_string());
            if offset.is_some() {
                w.push(" ");
            }
        }
        if let Some(offset) = offset {
            w.push("offset ");
            w.push(&offset.to_string());
        }
        Ok(())
    }
}

/// Reserved words that must be quoted when used as identifiers.
const RESERVED: &[&str] = &[
    "all", "and", "any", "as", "asc", "between", "case", "cast", "check", "column", "create",
    "cross", "current_date", "current_time", "default", "delete", "desc", "distinct", "do",
    "else", "end", "except", "false", "from", "full", "group", "having", "in", "inner",
    "intersect", "into", "is", "join", "left", "like", "limit", "not", "null", "offset", "on",
    "or", "order", "outer", "primary", "right", "select", "set", "table", "then", "true",
    "union", "update", "user", "using", "values", "when", "where", "with",
];

fn needs_quoting(ident: &str) -> bool {
    let plain = !ident.is_empty()
        && ident
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && ident
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    !plain || RESERVED.contains(&ident)
}

fn postgres_dialect() -> Arc<dyn Dialect> {
    Arc::new(PostgresDialect)
}

inventory::submit! {
    DialectRegistration::new("postgres", postgres_dialect)
}
