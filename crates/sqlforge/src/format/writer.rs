//! Output buffer for SQL formatting.

use crate::value::Value;

/// Per-connection formatting configuration.
///
/// `beautify` inserts line breaks and indentation between clauses for human
/// readability; it never affects clause order, placeholder order, or bound
/// parameters. `indent_size` is only meaningful when `beautify` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Insert line breaks and indentation between clauses.
    pub beautify: bool,
    /// Spaces per indent level when beautifying.
    pub indent_size: usize,
}

impl FormatOptions {
    /// Create formatting options.
    pub const fn new(beautify: bool, indent_size: usize) -> Self {
        Self {
            beautify,
            indent_size,
        }
    }

    /// Beautified output with the default indent width.
    pub const fn beautified() -> Self {
        Self::new(true, 2)
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(false, 2)
    }
}

/// The result of formatting a statement: SQL text with inline placeholders
/// plus the positionally-aligned argument values.
///
/// Invariant: placeholder count equals `params.len()`, and their
/// left-to-right order matches binding order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSql {
    /// Generated SQL text.
    pub sql: String,
    /// Bound arguments in placeholder order.
    pub params: Vec<Value>,
}

/// Accumulates SQL text and parameters during a single formatting pass.
///
/// A writer is created per format call and consumed by [`SqlWriter::finish`];
/// the formatter itself stays stateless between calls.
#[derive(Debug)]
pub struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    options: FormatOptions,
    depth: usize,
}

impl SqlWriter {
    /// Create an empty writer.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            options,
            depth: 0,
        }
    }

    /// Append a raw SQL fragment.
    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    /// Append a parameter value, returning its 1-based position.
    ///
    /// The caller is responsible for writing the matching placeholder.
    pub fn add_param(&mut self, value: Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Number of parameters appended so far.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Separator between clauses: a single space, or a line break plus the
    /// current indentation when beautifying.
    pub fn clause_break(&mut self) {
        if self.options.beautify {
            self.sql.push('\n');
            let width = self.depth * self.options.indent_size;
            for _ in 0..width {
                self.sql.push(' ');
            }
        } else {
            self.sql.push(' ');
        }
    }

    /// Increase the indent level for a nested scope (subquery).
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the indent level.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The active formatting options.
    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Consume the writer into its formatted output.
    pub fn finish(self) -> FormattedSql {
        FormattedSql {
            sql: self.sql,
            params: self.params,
        }
    }
}
