//! Path reconstruction: path data → ordered absolute vertices.
//!
//! The supported subset is an absolute `M x y`, followed by relative `l`
//! deltas, optionally terminated by a close marker:
//!
//! ```text
//! M981283.38 368690.15l143.81 72.46 155.86 -23.1 -299.67 -49.36Z
//! ```
//!
//! Deltas are applied cumulatively, so the pen drifts by whatever rounding
//! the source applied; that drift is kept as is.
//!
//! Not every bad path is an error. Paths with empty or missing coordinate
//! fields, or with fewer than three vertices, are upstream artifacts and are
//! [discarded](Reconstruction::Discarded). A field that is present but is
//! not a number is an error ([`ErrorCode::E001`]).

use std::fmt;

use log::trace;

use footprint_core::geometry::{PlanarPoint, RawPolygon};

use crate::{
    error::{Diagnostic, ErrorCode},
    lexer,
    span::Span,
    tokens::PathToken,
};

/// Why a path was dropped without being an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Discard {
    /// The path data holds nothing but whitespace
    Empty,
    /// Two delimiters were adjacent where a coordinate was expected
    EmptyCoordinate { span: Span },
    /// The data ended in the middle of a coordinate pair
    MissingCoordinate,
    /// Fewer than three effective vertices were reconstructed
    Degenerate { vertices: usize },
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discard::Empty => write!(f, "empty path data"),
            Discard::EmptyCoordinate { span } => {
                write!(f, "empty coordinate at byte {}", span.start())
            }
            Discard::MissingCoordinate => write!(f, "incomplete coordinate pair"),
            Discard::Degenerate { vertices } => {
                write!(f, "degenerate outline with {vertices} vertices")
            }
        }
    }
}

/// Outcome of reconstructing one path.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconstruction {
    Polygon(RawPolygon),
    Discarded(Discard),
}

/// One field of path data: the text between two delimiters.
#[derive(Debug, Clone, Copy)]
struct Field<'a> {
    text: &'a str,
    span: Span,
}

/// Reconstruct the absolute vertices of one path.
///
/// Spans in returned diagnostics are relative to `data`.
///
/// # Errors
///
/// - [`ErrorCode::E002`] if the data does not start with `M`
/// - [`ErrorCode::E001`] if a coordinate field is not a finite number
///
/// # Examples
///
/// ```
/// # use footprint_core::geometry::PlanarPoint;
/// # use footprint_parser::path::{reconstruct, Reconstruction};
/// let Ok(Reconstruction::Polygon(polygon)) = reconstruct("M10 20l5 5 -3 2") else {
///     panic!("expected a polygon");
/// };
/// assert_eq!(
///     polygon.vertices(),
///     &[
///         PlanarPoint::new(10.0, 20.0),
///         PlanarPoint::new(15.0, 25.0),
///         PlanarPoint::new(12.0, 27.0),
///     ]
/// );
/// ```
pub fn reconstruct(data: &str) -> Result<Reconstruction, Diagnostic> {
    let fields = match split_fields(data)? {
        Some(fields) => fields,
        None => return Ok(Reconstruction::Discarded(Discard::Empty)),
    };

    let mut coordinates = Vec::with_capacity(fields.len());
    for field in &fields {
        match parse_coordinate(field)? {
            Some(value) => coordinates.push(value),
            None => {
                return Ok(Reconstruction::Discarded(Discard::EmptyCoordinate {
                    span: field.span,
                }));
            }
        }
    }

    if coordinates.len() < 2 || coordinates.len() % 2 != 0 {
        return Ok(Reconstruction::Discarded(Discard::MissingCoordinate));
    }

    let mut pairs = coordinates.chunks_exact(2);
    let mut vertices = Vec::with_capacity(coordinates.len() / 2);
    if let Some(start) = pairs.next() {
        let mut pen = PlanarPoint::new(start[0], start[1]);
        vertices.push(pen);
        for delta in pairs {
            pen = pen.offset(delta[0], delta[1]);
            vertices.push(pen);
        }
    }

    let count = vertices.len();
    trace!(vertices = count; "Path reconstructed");

    Ok(match RawPolygon::new(vertices) {
        Some(polygon) => Reconstruction::Polygon(polygon),
        None => Reconstruction::Discarded(Discard::Degenerate { vertices: count }),
    })
}

/// Split path data into the fields following the initial moveto.
///
/// Returns `Ok(None)` for blank data. Trailing empty fields (e.g. produced
/// by a final close marker) are dropped.
fn split_fields(data: &str) -> Result<Option<Vec<Field<'_>>>, Diagnostic> {
    let tokens = lexer::tokenize(data);
    let mut tokens = tokens
        .iter()
        .skip_while(|t| t.token == PathToken::Space)
        .peekable();

    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    if first.token != PathToken::MoveTo {
        return Err(Diagnostic::error(format!(
            "path data must start with `M`, found `{}`",
            first.token
        ))
        .with_code(ErrorCode::E002)
        .with_label(first.span, ErrorCode::E002.description())
        .with_help("only absolute moveto followed by relative lineto segments is supported"));
    }

    let mut fields = Vec::new();
    let mut pending: Option<Field<'_>> = None;
    for token in tokens {
        match token.token {
            PathToken::Field(text) => {
                pending = Some(Field {
                    text,
                    span: token.span,
                });
            }
            _ => {
                let field = pending.take().unwrap_or(Field {
                    text: "",
                    span: Span::new(token.span.start()..token.span.start()),
                });
                fields.push(field);
            }
        }
    }
    if let Some(field) = pending {
        fields.push(field);
    }

    while fields.last().is_some_and(|f| f.text.is_empty()) {
        fields.pop();
    }

    Ok(Some(fields))
}

/// Parse one coordinate; `Ok(None)` for an empty field.
fn parse_coordinate(field: &Field<'_>) -> Result<Option<f64>, Diagnostic> {
    if field.text.is_empty() {
        return Ok(None);
    }

    match field.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Diagnostic::error(format!(
            "coordinate `{}` is not a number",
            field.text
        ))
        .with_code(ErrorCode::E001)
        .with_label(field.span, ErrorCode::E001.description())
        .with_help("path coordinates must be finite decimal numbers such as `368690.15`")),
    }
}
