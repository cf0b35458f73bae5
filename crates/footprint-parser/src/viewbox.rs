//! Parsing of the root `viewBox` attribute.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{delimited, separated},
    error::ModalResult,
    token::take_while,
};

use footprint_core::geometry::BoundingBox;

/// Whitespace and/or commas between two numbers
fn separator(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f64> {
    float.parse_next(input)
}

fn view_box_numbers(input: &mut &str) -> ModalResult<Vec<f64>> {
    delimited(multispace0, separated(4, number, separator), multispace0).parse_next(input)
}

/// Parse a `viewBox` value (`min-x min-y width height`) into its box.
///
/// Returns `None` unless the value is exactly four finite numbers with a
/// non-negative width and height.
///
/// # Examples
///
/// ```
/// # use footprint_parser::viewbox::parse_view_box;
/// let view_box = parse_view_box("981000 368000 2000 1500").unwrap();
/// assert_eq!(view_box.max().x(), 983000.0);
/// assert_eq!(view_box.max().y(), 369500.0);
///
/// assert!(parse_view_box("0 0 10").is_none());
/// ```
pub fn parse_view_box(value: &str) -> Option<BoundingBox> {
    let numbers = view_box_numbers.parse(value).ok()?;
    match numbers.as_slice() {
        &[x, y, width, height] => BoundingBox::from_origin_size(x, y, width, height),
        _ => None,
    }
}
