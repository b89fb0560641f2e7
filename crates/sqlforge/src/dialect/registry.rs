//! Dialect resolution.
//!
//! Resolution works over an explicit, injectable candidate list rather than
//! ambient environment scanning: dialect crates advertise themselves with a
//! [`DialectRegistration`] submitted through the `inventory` crate, and
//! [`DialectRegistry::discover`] turns the advertised set into a registry
//! that can also be built by hand in tests or configuration code.
//!
//! The invariant is "exactly one or fail": zero candidates fall back to the
//! generic no-override dialect, one candidate wins, and two or more abort
//! resolution naming every candidate — silently picking among materially
//! different SQL dialects would produce hard-to-diagnose incorrect SQL.

use std::sync::Arc;

use crate::dialect::{Dialect, GenericDialect};
use crate::error::{SqlError, SqlResult};

/// Advertises a dialect implementation for process-wide discovery.
///
/// A dialect crate submits one of these:
///
/// ```ignore
/// fn postgres_dialect() -> Arc<dyn Dialect> {
///     Arc::new(PostgresDialect)
/// }
///
/// inventory::submit! {
///     DialectRegistration::new("postgres", postgres_dialect)
/// }
/// ```
pub struct DialectRegistration {
    name: &'static str,
    factory: fn() -> Arc<dyn Dialect>,
}

impl DialectRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn() -> Arc<dyn Dialect>) -> Self {
        Self { name, factory }
    }

    /// Advertised dialect name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Instantiate the advertised dialect.
    pub fn instantiate(&self) -> Arc<dyn Dialect> {
        (self.factory)()
    }
}

inventory::collect!(DialectRegistration);

/// Explicit list of dialect candidates for resolution.
#[derive(Default)]
pub struct DialectRegistry {
    candidates: Vec<Arc<dyn Dialect>>,
}

impl DialectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from all advertised [`DialectRegistration`]s.
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<DialectRegistration> {
            registry.register(registration.instantiate());
        }
        registry
    }

    /// Add a candidate dialect.
    pub fn register(&mut self, dialect: Arc<dyn Dialect>) -> &mut Self {
        self.candidates.push(dialect);
        self
    }

    /// Names of all candidates, in registration order.
    pub fn candidate_names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|d| d.name()).collect()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the registry has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Resolve the active dialect.
    ///
    /// Zero candidates resolve to [`GenericDialect`]; exactly one resolves to
    /// it; more than one fails with an ambiguous-configuration error naming
    /// every candidate. The result is a pure function of the candidate list
    /// and safe to cache for the lifetime of a database configuration.
    pub fn resolve(&self) -> SqlResult<Arc<dyn Dialect>> {
        match self.candidates.as_slice() {
            [] => Ok(Arc::new(GenericDialect)),
            [only] => Ok(Arc::clone(only)),
            many => Err(SqlError::AmbiguousDialect {
                candidates: many.iter().map(|d| d.name().to_string()).collect(),
            }),
        }
    }
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("candidates", &self.candidate_names())
            .finish()
    }
}

/// Resolve the process-wide dialect from advertised registrations.
pub fn detect_dialect() -> SqlResult<Arc<dyn Dialect>> {
    DialectRegistry::discover().resolve()
}
