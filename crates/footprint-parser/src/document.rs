//! Scanning an SVG document for its viewBox and path data.

use log::trace;
use roxmltree::{Document, Node, ParsingOptions, TextPos};

use footprint_core::geometry::BoundingBox;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
    viewbox::parse_view_box,
};

/// The `d` attribute of one `<path>` element.
#[derive(Debug, Clone)]
pub(crate) struct PathSource {
    pub data: String,
    /// Byte offset of `data` in the document, if it appears there verbatim
    pub data_offset: Option<usize>,
    /// The whole `<path>` element
    pub element: Span,
}

/// Everything the import needs from the document.
#[derive(Debug)]
pub(crate) struct Scan {
    pub view_box: BoundingBox,
    pub paths: Vec<PathSource>,
    pub paths_seen: usize,
    pub open_paths: usize,
}

/// Read the viewBox of the root element and collect path data in
/// document order.
///
/// With `closed_only`, paths whose data does not end with a close marker
/// are counted in [`Scan::open_paths`] and left out.
pub(crate) fn scan(source: &str, closed_only: bool) -> Result<Scan, Diagnostic> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(source, options).map_err(|err| {
        let offset = byte_offset(source, err.pos());
        Diagnostic::error(format!("document is not well-formed: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(Span::new(offset..offset), ErrorCode::E100.description())
    })?;

    let root = document.root_element();
    let root_span = start_tag_span(source, root);
    if root.tag_name().name() != "svg" {
        return Err(Diagnostic::error(format!(
            "root element is `<{}>`, expected `<svg>`",
            root.tag_name().name()
        ))
        .with_code(ErrorCode::E103)
        .with_label(root_span, ErrorCode::E103.description()));
    }

    let view_box = resolve_view_box(source, root, root_span)?;

    let mut paths = Vec::new();
    let mut paths_seen = 0;
    let mut open_paths = 0;
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "path")
    {
        let Some(data) = node.attribute("d") else {
            continue;
        };
        paths_seen += 1;

        if closed_only && !is_closed(data) {
            open_paths += 1;
            continue;
        }

        let element = Span::new(node.range());
        paths.push(PathSource {
            data: data.to_owned(),
            data_offset: attribute_value_offset(source, element, "d", data),
            element,
        });
    }

    trace!(paths_seen, open_paths; "Document scanned");

    Ok(Scan {
        view_box,
        paths,
        paths_seen,
        open_paths,
    })
}

fn resolve_view_box(source: &str, root: Node<'_, '_>, root_span: Span) -> Result<BoundingBox, Diagnostic> {
    let Some(value) = root.attribute("viewBox") else {
        return Err(Diagnostic::error("document has no viewBox")
            .with_code(ErrorCode::E101)
            .with_label(root_span, ErrorCode::E101.description())
            .with_help("add a `viewBox=\"min-x min-y width height\"` attribute to the root element"));
    };

    parse_view_box(value).ok_or_else(|| {
        let span = attribute_value_offset(source, root_span, "viewBox", value)
            .map(|start| Span::new(start..start + value.len()))
            .unwrap_or(root_span);
        Diagnostic::error(format!("viewBox `{value}` is not a valid box"))
            .with_code(ErrorCode::E102)
            .with_label(span, ErrorCode::E102.description())
            .with_help("expected four numbers `min-x min-y width height` with non-negative width and height")
    })
}

/// Returns true if the path data ends with a close marker
fn is_closed(data: &str) -> bool {
    data.trim_end().ends_with(['Z', 'z'])
}

/// The span of an element's start tag, or the whole element if the tag
/// cannot be delimited.
fn start_tag_span(source: &str, node: Node<'_, '_>) -> Span {
    let range = node.range();
    source
        .get(range.clone())
        .and_then(|text| text.find('>'))
        .map(|end| Span::new(range.start..range.start + end + 1))
        .unwrap_or_else(|| Span::new(range))
}

/// Locate the raw text of an attribute value inside an element.
///
/// Returns `None` if the value does not appear verbatim, for example
/// because it contains character references.
fn attribute_value_offset(source: &str, element: Span, name: &str, value: &str) -> Option<usize> {
    let text = source.get(element.to_range())?;
    let mut search = 0;
    while let Some(found) = text[search..].find(name) {
        let at = search + found;
        search = at + name.len();

        let preceded_by_space = text[..at].chars().next_back().is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }
        let Some(rest) = text[search..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(quote) = rest.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
            continue;
        };

        let start = element.start() + (text.len() - rest.len()) + quote.len_utf8();
        if source.get(start..start + value.len()) == Some(value) {
            return Some(start);
        }
    }
    None
}

/// Convert a 1-based row/column position into a byte offset.
fn byte_offset(source: &str, pos: TextPos) -> usize {
    let row = pos.row.saturating_sub(1) as usize;
    let col = pos.col.saturating_sub(1) as usize;

    let line_start = source
        .split_inclusive('\n')
        .take(row)
        .map(str::len)
        .sum::<usize>();
    let line = &source[line_start.min(source.len())..];

    line.char_indices()
        .nth(col)
        .map(|(i, _)| line_start + i)
        .unwrap_or(source.len())
}

#[cfg(test)]
mod tests {
    use footprint_core::geometry::PlanarPoint;

    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50">
  <g>
    <path d="M10 20l5 5 -3 2Z"/>
    <path d="M30 30l5 0 0 5"/>
    <path d="M50 10l5 0 0 5z" fill="none"/>
    <rect x="0" y="0" width="1" height="1"/>
  </g>
</svg>
"#;

    #[test]
    fn test_scan_collects_closed_paths() {
        let scan = scan(DOCUMENT, true).unwrap();
        assert_eq!(scan.view_box.max(), PlanarPoint::new(100.0, 50.0));
        assert_eq!(scan.paths_seen, 3);
        assert_eq!(scan.open_paths, 1);

        let data: Vec<&str> = scan.paths.iter().map(|p| p.data.as_str()).collect();
        assert_eq!(data, ["M10 20l5 5 -3 2Z", "M50 10l5 0 0 5z"]);
    }

    #[test]
    fn test_scan_keeps_open_paths_when_asked() {
        let scan = scan(DOCUMENT, false).unwrap();
        assert_eq!(scan.paths.len(), 3);
        assert_eq!(scan.open_paths, 0);
    }

    #[test]
    fn test_data_offset_points_into_the_document() {
        let scan = scan(DOCUMENT, true).unwrap();
        for path in &scan.paths {
            let offset = path.data_offset.unwrap();
            assert_eq!(&DOCUMENT[offset..offset + path.data.len()], path.data);
            assert!(path.element.start() < offset && offset < path.element.end());
        }
    }

    #[test]
    fn test_escaped_data_has_no_offset() {
        let source = r#"<svg viewBox="0 0 1 1"><path d="M0&#32;0l1 0 0 1Z"/></svg>"#;
        let scan = scan(source, true).unwrap();
        assert_eq!(scan.paths[0].data, "M0 0l1 0 0 1Z");
        assert!(scan.paths[0].data_offset.is_none());
    }

    #[test]
    fn test_malformed_xml() {
        let err = scan("<svg viewBox=\"0 0 1 1\">\n  <path d=\"M0 0\">\n</svg>", true).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_not_svg() {
        let err = scan(r#"<html viewBox="0 0 1 1"/>"#, true).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E103));
    }

    #[test]
    fn test_missing_view_box() {
        let source = r#"<svg width="10" height="10"><path d="M0 0l1 0 0 1Z"/></svg>"#;
        let err = scan(source, true).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert_eq!(err.labels()[0].span(), Span::new(0..28));
    }

    #[test]
    fn test_invalid_view_box_points_at_the_value() {
        let source = r#"<svg viewBox="0 0 10"/>"#;
        let err = scan(source, true).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E102));
        assert_eq!(err.labels()[0].span(), Span::new(14..20));
    }

    #[test]
    fn test_byte_offset() {
        let source = "ab\ncdé\nfg";
        assert_eq!(byte_offset(source, TextPos::new(1, 1)), 0);
        assert_eq!(byte_offset(source, TextPos::new(2, 3)), 5);
        assert_eq!(byte_offset(source, TextPos::new(3, 2)), 9);
        assert_eq!(byte_offset(source, TextPos::new(9, 9)), source.len());
    }

    #[test]
    fn test_is_closed() {
        assert!(is_closed("M0 0l1 0 0 1Z"));
        assert!(is_closed("M0 0l1 0 0 1z  "));
        assert!(!is_closed("M0 0l1 0 0 1"));
    }
}
