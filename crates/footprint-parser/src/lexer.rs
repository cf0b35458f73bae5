//! Lexical analyzer for path data.
//!
//! Every character is either a delimiter (`M`, `l`, `Z`, `z`, whitespace) or
//! part of a field, so tokenizing cannot fail. Delimiters are emitted one
//! character at a time: two adjacent delimiters enclose an empty field,
//! which the reconstructor treats as an artifact.

use winnow::{
    Parser as _,
    combinator::alt,
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::{one_of, take_while},
};

use crate::{
    span::Span,
    tokens::{PathToken, PositionedToken},
};

type Input<'a> = LocatingSlice<&'a str>;

fn is_delimiter(c: char) -> bool {
    matches!(c, 'M' | 'l' | 'Z' | 'z') || c.is_whitespace()
}

/// Parse a single delimiter character
fn delimiter<'a>(input: &mut Input<'a>) -> ModalResult<PathToken<'a>> {
    alt((
        'M'.value(PathToken::MoveTo),
        'l'.value(PathToken::LineTo),
        one_of(['Z', 'z']).value(PathToken::Close),
        one_of(|c: char| c.is_whitespace()).value(PathToken::Space),
    ))
    .parse_next(input)
}

/// Parse a run of field characters
fn field<'a>(input: &mut Input<'a>) -> ModalResult<PathToken<'a>> {
    take_while(1.., |c: char| !is_delimiter(c))
        .map(PathToken::Field)
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> ModalResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();
    let token = alt((delimiter, field)).parse_next(input)?;
    let end_pos = input.current_token_start();

    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Split path data into tokens.
///
/// # Examples
///
/// ```text
/// "M10 20l5 5"  =>  M  Field("10")  Space  Field("20")  l  Field("5")  Space  Field("5")
/// ```
pub fn tokenize(data: &str) -> Vec<PositionedToken<'_>> {
    let mut input = LocatingSlice::new(data);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        match positioned_token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                // Not reachable for `&str` input: every character is either a
                // delimiter or a field character. Keep the rest as one field.
                let start = input.current_token_start();
                let rest = &data[start..];
                tokens.push(PositionedToken::new(
                    PathToken::Field(rest),
                    Span::new(start..data.len()),
                ));
                break;
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(data: &str) -> Vec<PathToken<'_>> {
        tokenize(data).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_simple_path() {
        assert_eq!(
            kinds("M10 20l5 5Z"),
            vec![
                PathToken::MoveTo,
                PathToken::Field("10"),
                PathToken::Space,
                PathToken::Field("20"),
                PathToken::LineTo,
                PathToken::Field("5"),
                PathToken::Space,
                PathToken::Field("5"),
                PathToken::Close,
            ]
        );
    }

    #[test]
    fn test_each_whitespace_character_is_its_own_token() {
        assert_eq!(
            kinds("1 \t2"),
            vec![
                PathToken::Field("1"),
                PathToken::Space,
                PathToken::Space,
                PathToken::Field("2"),
            ]
        );
    }

    #[test]
    fn test_negative_and_exponent_fields() {
        assert_eq!(
            kinds("-3.5 1e-2"),
            vec![
                PathToken::Field("-3.5"),
                PathToken::Space,
                PathToken::Field("1e-2"),
            ]
        );
    }

    #[test]
    fn test_unsupported_commands_stay_inside_fields() {
        assert_eq!(kinds("L5,5"), vec![PathToken::Field("L5,5")]);
    }

    #[test]
    fn test_lowercase_close() {
        assert_eq!(kinds("z"), vec![PathToken::Close]);
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("M981283.38 368690.15");
        assert_eq!(tokens[0].span, Span::new(0..1));
        assert_eq!(tokens[1].span, Span::new(1..10));
        assert_eq!(tokens[2].span, Span::new(10..11));
        assert_eq!(tokens[3].span, Span::new(11..20));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_multibyte_characters_keep_byte_spans() {
        let tokens = tokenize("é1 2");
        assert_eq!(tokens[0].token, PathToken::Field("é1"));
        assert_eq!(tokens[0].span, Span::new(0..3));
    }
}
