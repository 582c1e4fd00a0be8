//! nom parsers for the length and margin literals accepted in report options.

use crate::dimension::Margins;
use crate::error::StyleError;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1, space0, space1};
use nom::combinator::{map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::{IResult, Parser};

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(1.0, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm"). Bare numbers are points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, number) = parse_f32(input)?;
    let (input, multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, number * multiplier.unwrap_or(1.0)))
}

fn run_parser<'a, T>(
    mut parser: impl Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
    input: &'a str,
) -> Result<T, StyleError> {
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleError::Parse(format!(
            "Unexpected trailing input '{}' in '{}'",
            rem, input
        ))),
        Err(e) => Err(StyleError::Parse(e.to_string())),
    }
}

pub fn parse_length_str(input: &str) -> Result<f32, StyleError> {
    run_parser(parse_length, input)
}

/// Parses CSS shorthand margins (1, 2, or 4 values).
pub fn parse_margins_str(input: &str) -> Result<Margins, StyleError> {
    let parts = run_parser(
        delimited(space0, separated_list1(space1, parse_length), space0),
        input,
    )?;
    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [vertical, horizontal] => Ok(Margins::symmetric(*vertical, *horizontal)),
        [top, right, bottom, left] => Ok(Margins {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(StyleError::Parse(format!(
            "Invalid number of values for margin shorthand: got {}, expected 1, 2, or 4.",
            parts.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length_units() {
        assert_eq!(parse_length_str("12").unwrap(), 12.0);
        assert_eq!(parse_length_str("12pt").unwrap(), 12.0);
        assert_eq!(parse_length_str(" 0.5in ").unwrap(), 36.0);
        assert_eq!(parse_length_str(".25IN").unwrap(), 18.0);
        assert!((parse_length_str("10mm").unwrap() - 28.35).abs() < 1e-4);
    }

    #[test]
    fn test_parse_length_rejects_garbage() {
        assert!(parse_length_str("twelve").is_err());
        assert!(parse_length_str("12 furlongs").is_err());
        assert!(parse_length_str("").is_err());
    }

    #[test]
    fn test_parse_margins() {
        assert_eq!(parse_margins_str("10pt").unwrap(), Margins::all(10.0));
        assert_eq!(
            parse_margins_str("1in 2in 3in 4in").unwrap(),
            Margins {
                top: 72.0,
                right: 144.0,
                bottom: 216.0,
                left: 288.0
            }
        );
        assert!(parse_margins_str("1pt 2pt 3pt").is_err());
    }
}
