//! Token definitions for path data.
//!
//! Path data is split on command letters and whitespace. Everything between
//! two delimiters is a [`PathToken::Field`], which should hold one number.

use std::fmt;

use crate::span::Span;

/// A lexical unit of path data.
#[derive(Debug, Clone, PartialEq)]
pub enum PathToken<'a> {
    /// `M`, absolute moveto
    MoveTo,
    /// `l`, relative lineto
    LineTo,
    /// `Z` or `z`, closepath
    Close,
    /// A single whitespace character
    Space,
    /// A maximal run of non-delimiter characters
    Field(&'a str),
}

impl fmt::Display for PathToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::MoveTo => write!(f, "M"),
            PathToken::LineTo => write!(f, "l"),
            PathToken::Close => write!(f, "Z"),
            PathToken::Space => write!(f, " "),
            PathToken::Field(text) => write!(f, "{text}"),
        }
    }
}

/// A token together with its byte span in the path data.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: PathToken<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: PathToken<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
