//! Error and diagnostic system for the Footprint document parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the document text
//! - Severity levels
//! - Diagnostic collector for accumulating per-path problems
//!
//! # Overview
//!
//! Document-level problems (malformed XML, missing or invalid `viewBox`) are
//! fatal and returned as a [`ParseError`]. Problems confined to one path's
//! data only skip that path; they are reported as [`Diagnostic`]s on the
//! parsed document instead.
//!
//! # Example
//!
//! ```
//! # use footprint_parser::error::{Diagnostic, ErrorCode};
//! # use footprint_parser::Span;
//!
//! let diag = Diagnostic::error("coordinate `12.3.4` is not a number")
//!     .with_code(ErrorCode::E001)
//!     .with_label(Span::new(40..46), "malformed number")
//!     .with_help("path coordinates must be decimal numbers");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
