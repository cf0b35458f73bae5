//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the document text.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the offending text, e.g. a malformed coordinate.
/// - **Secondary labels** add context, e.g. the path element the coordinate
///   belongs to.
///
/// # Example
///
/// ```text
/// error[E001]: coordinate `7..5` is not a number
///   --> buildings.svg:3:31
///    |
///  3 | <path d="M981283.38 368690.15l7..5 72.46Z"/>
///    |       -----------------------^^^^--------- in this path
///    |                              |
///    |                              malformed number
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }

    /// Returns the label moved forward by `offset` bytes.
    pub(crate) fn shift(mut self, offset: usize) -> Self {
        self.span = self.span.shift(offset);
        self
    }
}
