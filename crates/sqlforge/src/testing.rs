//! In-memory fakes for exercising the execution seams in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::database::{Database, PreparedStatement};
use crate::dialect::{Dialect, GenericDialect};
use crate::error::SqlResult;
use crate::format::FormatOptions;
use crate::value::Value;

/// A backendless database handle that records prepared SQL, bound arguments,
/// and statement closes.
pub(crate) struct FakeDatabase {
    pub dialect: Arc<dyn Dialect>,
    pub options: FormatOptions,
    pub generated_keys: Vec<Vec<Value>>,
    pub closes: Arc<AtomicUsize>,
    pub last_sql: Arc<Mutex<String>>,
    pub last_bound: Arc<Mutex<Vec<Value>>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self {
            dialect: Arc::new(GenericDialect),
            options: FormatOptions::default(),
            generated_keys: Vec::new(),
            closes: Arc::new(AtomicUsize::new(0)),
            last_sql: Arc::new(Mutex::new(String::new())),
            last_bound: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Database for FakeDatabase {
    fn dialect(&self) -> Arc<dyn Dialect> {
        Arc::clone(&self.dialect)
    }

    fn format_options(&self) -> FormatOptions {
        self.options
    }

    async fn prepare(
        &self,
        sql: &str,
        _auto_generated_keys: bool,
    ) -> SqlResult<Box<dyn PreparedStatement>> {
        *self.last_sql.lock().unwrap() = sql.to_string();
        Ok(Box::new(FakeStatement {
            generated_keys: self.generated_keys.clone(),
            closes: Arc::clone(&self.closes),
            bound: Arc::clone(&self.last_bound),
        }))
    }
}

/// A prepared-statement fake that counts closes.
pub(crate) struct FakeStatement {
    generated_keys: Vec<Vec<Value>>,
    closes: Arc<AtomicUsize>,
    bound: Arc<Mutex<Vec<Value>>>,
}

impl FakeStatement {
    pub fn with_generated_keys(rows: Vec<Vec<Value>>) -> Self {
        Self {
            generated_keys: rows,
            closes: Arc::new(AtomicUsize::new(0)),
            bound: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PreparedStatement for FakeStatement {
    async fn execute(&mut self, params: &[Value]) -> SqlResult<u64> {
        *self.bound.lock().unwrap() = params.to_vec();
        Ok(1)
    }

    async fn generated_keys(&mut self) -> SqlResult<Vec<Vec<Value>>> {
        Ok(self.generated_keys.clone())
    }

    async fn close(&mut self) -> SqlResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
