//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! This module provides types for creating, collecting, and querying
//! diagnostics produced around a lexical analysis run. The engine itself
//! never fails; diagnostics are how callers summarize error-kind tokens
//! and other findings for display.
//!
//! # Examples
//!
//! ```
//! use mango_util::{Diagnostic, Handler, Span};
//!
//! let handler = Handler::new();
//! handler.emit_diagnostic(Diagnostic::error("malformed integer literal", Span::DUMMY));
//!
//! if handler.has_errors() {
//!     eprintln!("analysis produced {} findings", handler.error_count());
//! }
//! ```

use crate::Span;
use std::cell::{Ref, RefCell};
use std::fmt;

/// Diagnostic severity level
///
/// # Examples
///
/// ```
/// use mango_util::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A finding the caller will usually treat as an error
    Error,
    /// A finding worth surfacing that does not invalidate the run
    Warning,
    /// Additional information about another diagnostic
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with severity and location
///
/// # Examples
///
/// ```
/// use mango_util::{Diagnostic, Level, Span};
///
/// let diag = Diagnostic::error("something went wrong", Span::DUMMY);
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Additional notes for context
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    /// Create an error diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use mango_util::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::error("unrecognized lexeme", Span::DUMMY);
    /// ```
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Add a note to the diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use mango_util::{Diagnostic, Span};
    ///
    /// let diag = Diagnostic::error("malformed literal", Span::DUMMY)
    ///     .with_note("expected a closing `#`");
    /// assert_eq!(diag.notes.len(), 1);
    /// ```
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}, column {})",
            self.level, self.message, self.span.line, self.span.column
        )
    }
}

/// Handler for collecting and reporting diagnostics
///
/// The `Handler` collects diagnostics and provides methods for querying
/// their counts. Interior mutability lets producers emit through a shared
/// reference, mirroring how a single analysis pass fans findings into one
/// sink.
///
/// # Examples
///
/// ```
/// use mango_util::{Diagnostic, Handler, Span};
///
/// let handler = Handler::new();
/// assert!(!handler.has_errors());
///
/// handler.emit_diagnostic(Diagnostic::error("unexpected input", Span::DUMMY));
/// assert_eq!(handler.error_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Handler {
    /// Collected diagnostics
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any error-level diagnostics have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get the number of error-level diagnostics
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Get the number of warning-level diagnostics
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Borrow the collected diagnostics, in emission order
    pub fn diagnostics(&self) -> Ref<'_, Vec<Diagnostic>> {
        self.diagnostics.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_handler() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
        assert_eq!(handler.warning_count(), 0);
        assert!(handler.diagnostics().is_empty());
    }

    #[test]
    fn test_emit_and_count() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("first", Span::DUMMY));
        handler.emit_diagnostic(Diagnostic::warning("second", Span::DUMMY));
        handler.emit_diagnostic(Diagnostic::error("third", Span::DUMMY));

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 2);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.diagnostics().len(), 3);
    }

    #[test]
    fn test_emission_order_preserved() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("a", Span::DUMMY));
        handler.emit_diagnostic(Diagnostic::error("b", Span::DUMMY));

        let diags = handler.diagnostics();
        assert_eq!(diags[0].message, "a");
        assert_eq!(diags[1].message, "b");
    }

    #[test]
    fn test_notes_and_display() {
        let diag = Diagnostic::error("malformed literal", Span::new(4, 8, 2, 5))
            .with_note("expected a closing `#`");
        assert_eq!(diag.notes, vec!["expected a closing `#`".to_string()]);
        assert_eq!(
            diag.to_string(),
            "error: malformed literal (line 2, column 5)"
        );
    }
}
