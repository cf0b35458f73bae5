//! Error codes for the Footprint diagnostic system.
//!
//! Error codes are organized by scope:
//! - `E0xx` - Path data errors (the path is skipped, the import continues)
//! - `E1xx` - Document errors (the whole import is aborted)

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Path Data Errors (E0xx)
    // =========================================================================
    /// Malformed number.
    ///
    /// A coordinate field is present but is not a finite decimal number.
    E001,

    /// Missing moveto.
    ///
    /// Path data must start with an absolute `M` command.
    E002,

    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The document is not well-formed XML.
    E100,

    /// Missing viewBox.
    ///
    /// The root element declares no `viewBox`, so there is no reference
    /// frame for axis correction.
    E101,

    /// Invalid viewBox.
    ///
    /// The `viewBox` is not four finite numbers, or its width or height
    /// is negative.
    E102,

    /// Not an SVG document.
    ///
    /// The root element is not `<svg>`.
    E103,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed number",
            ErrorCode::E002 => "missing moveto",
            ErrorCode::E100 => "malformed document",
            ErrorCode::E101 => "missing viewBox",
            ErrorCode::E102 => "invalid viewBox",
            ErrorCode::E103 => "not an SVG document",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed number");
        assert_eq!(ErrorCode::E101.description(), "missing viewBox");
    }
}
