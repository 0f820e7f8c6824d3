//! Parser for dotted property paths
//!
//! This module uses nom to parse path strings like:
//! - `title`
//! - `user.address.city`
//! - `tags[*]`
//! - `matrix[0][*].value`
//!
//! Each dot-separated part is one identifier (not starting with a digit) followed by
//! any number of `[n]` or `[*]` suffixes.

use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::character::complete::{char, digit1, satisfy};
use nom::combinator::{all_consuming, map_res, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};

use super::PathSegment;
use crate::error::{Error, Result};

/// Parse an identifier (alphanumeric, underscore, or dash, not starting with a digit or dash)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
    ))
    .parse(input)
}

/// Parse one bracketed suffix: `[*]` or `[n]`
fn bracket_suffix(input: &str) -> IResult<&str, PathSegment> {
    delimited(
        char('['),
        alt((
            value(PathSegment::Items, char('*')),
            map_res(digit1, |digits: &str| {
                digits.parse::<usize>().map(PathSegment::Index)
            }),
        )),
        char(']'),
    )
    .parse(input)
}

/// Parse one dotted part into its property segment and trailing suffixes
fn dotted_part(input: &str) -> IResult<&str, (&str, Vec<PathSegment>)> {
    pair(identifier, many0(bracket_suffix)).parse(input)
}

/// Parse a complete dotted path into segments
pub(super) fn parse_segments(input: &str) -> Result<Vec<PathSegment>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    for part in input.split('.') {
        let Ok((_, (name, suffixes))) = all_consuming(dotted_part).parse(part) else {
            return Err(error_stack::Report::new(Error::InvalidPathSegment(
                part.to_string(),
            )));
        };
        segments.push(PathSegment::Property(name.to_string()));
        segments.extend(suffixes);
    }

    Ok(segments)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use super::*;

    #[test]
    fn test_single_identifier() {
        let segments = parse_segments("title").unwrap();
        assert_eq!(segments, vec![PathSegment::Property("title".to_string())]);
    }

    #[test]
    fn test_nested_with_suffixes() {
        let segments = parse_segments("matrix[0][*].value").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::Property("matrix".to_string()),
                PathSegment::Index(0),
                PathSegment::Items,
                PathSegment::Property("value".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifier_with_dash_and_underscore() {
        let segments = parse_segments("_meta.created-at").unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_leading_digit_rejected() {
        let error = parse_segments("user.1name").unwrap_err();
        assert_eq!(
            error.current_context(),
            &Error::InvalidPathSegment("1name".to_string())
        );
    }

    #[test]
    fn test_malformed_parts_rejected() {
        for input in ["a..b", ".a", "a.", "a[", "a[x]", "a[1", "[0]", "a b", "a[-1]"] {
            assert!(parse_segments(input).is_err(), "expected '{input}' to fail");
        }
    }
}
