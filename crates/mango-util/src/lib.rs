//! mango-util - Core Utilities and Foundation Types
//!
//! This crate provides the foundation types shared across the mangoc
//! analyzer: source spans and the diagnostic infrastructure.
//!
//! # Overview
//!
//! The lexical analysis engine is a total function — it never aborts and
//! never raises. The types here exist around that engine:
//!
//! - [`Span`] attaches byte offsets and 1-based line/column positions to
//!   tokens and diagnostics.
//! - [`Diagnostic`], [`Level`], and [`Handler`] collect findings (such as
//!   malformed-literal tokens surfaced by the driver) for display, without
//!   ever interrupting an analysis pass.
//!
//! # Example Usage
//!
//! ```
//! use mango_util::{Diagnostic, Handler, Span};
//!
//! let handler = Handler::new();
//! let span = Span::new(0, 4, 1, 1);
//! handler.emit_diagnostic(Diagnostic::error("unrecognized lexeme `@@@`", span));
//!
//! assert!(handler.has_errors());
//! for diag in handler.diagnostics().iter() {
//!     eprintln!("{}", diag);
//! }
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod span;

// Re-export main types for convenience
pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
