//! nom parsers for table attribute values.
//!
//! Each attribute has a low-level parser returning `IResult`, composable into
//! the space-separated list forms MathML uses; [`run_parser`] turns any of
//! them into a `Result` that demands the whole input be consumed.

use crate::length::{Length, NamedSpace, Unit};
use crate::table::{ColumnAlign, ColumnWidth, LineStyle, RowAlign, Side, TableAlign};
use crate::values::ValueList;
use crate::variant::MathVariant;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{char, digit0, digit1, multispace1};
use nom::combinator::{map, map_opt, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing attribute values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

type ParseError<'a> = nom::error::Error<&'a str>;

// --- Helper Parsers ---

fn sign(input: &str) -> IResult<&str, char> {
    alt((char('+'), char('-'))).parse(input)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(sign),
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_i32(input: &str) -> IResult<&str, i32> {
    map_res(recognize((opt(sign), digit1)), |s: &str| s.parse::<i32>()).parse(input)
}

/// Wraps `item` into a parser for a whitespace-separated, non-empty list.
pub fn list<'a, O, P>(item: P) -> impl Parser<&'a str, Output = ValueList<O>, Error = ParseError<'a>>
where
    P: Parser<&'a str, Output = O, Error = ParseError<'a>>,
{
    map_opt(separated_list1(multispace1, item), ValueList::new)
}

// --- Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, Unit> {
    alt((
        value(Unit::Em, tag_no_case("em")),
        value(Unit::Ex, tag_no_case("ex")),
        value(Unit::Px, tag_no_case("px")),
        value(Unit::In, tag_no_case("in")),
        value(Unit::Cm, tag_no_case("cm")),
        value(Unit::Mm, tag_no_case("mm")),
        value(Unit::Pt, tag_no_case("pt")),
        value(Unit::Pc, tag_no_case("pc")),
        value(Unit::Percentage, tag("%")),
    ))
    .parse(input)
}

/// Parses a named space such as `thinmathspace` or `negativethickmathspace`.
pub fn parse_named_space(input: &str) -> IResult<&str, Length> {
    let (input, negative) = opt(tag_no_case("negative")).parse(input)?;
    let (input, space) = alt((
        value(NamedSpace::VeryVeryThin, tag_no_case("veryverythinmathspace")),
        value(NamedSpace::VeryThin, tag_no_case("verythinmathspace")),
        value(NamedSpace::Thin, tag_no_case("thinmathspace")),
        value(NamedSpace::Medium, tag_no_case("mediummathspace")),
        value(NamedSpace::Thick, tag_no_case("thickmathspace")),
        value(NamedSpace::VeryThick, tag_no_case("verythickmathspace")),
        value(NamedSpace::VeryVeryThick, tag_no_case("veryverythickmathspace")),
    ))
    .parse(input)?;
    Ok((input, Length::Space { space, negative: negative.is_some() }))
}

/// Parses a length (e.g., "1ex", "0.8em", "25%", "2", "thinmathspace").
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    alt((
        parse_named_space,
        map((parse_f32, opt(parse_unit)), |(value, unit)| {
            Length::new(value, unit.unwrap_or(Unit::None))
        }),
    ))
    .parse(input)
}

pub fn parse_length_list(input: &str) -> IResult<&str, ValueList<Length>> {
    list(parse_length).parse(input)
}

// --- Table Attribute Parsers ---

/// Parses a column width: "auto", "fit", or a length.
pub fn parse_column_width(input: &str) -> IResult<&str, ColumnWidth> {
    alt((
        value(ColumnWidth::Auto, tag_no_case("auto")),
        value(ColumnWidth::Fit, tag_no_case("fit")),
        map(parse_length, ColumnWidth::Length),
    ))
    .parse(input)
}

pub fn parse_line_style(input: &str) -> IResult<&str, LineStyle> {
    alt((
        value(LineStyle::None, tag_no_case("none")),
        value(LineStyle::Solid, tag_no_case("solid")),
        value(LineStyle::Dashed, tag_no_case("dashed")),
    ))
    .parse(input)
}

pub fn parse_side(input: &str) -> IResult<&str, Side> {
    alt((
        value(Side::LeftOverlap, tag_no_case("leftoverlap")),
        value(Side::RightOverlap, tag_no_case("rightoverlap")),
        value(Side::Left, tag_no_case("left")),
        value(Side::Right, tag_no_case("right")),
    ))
    .parse(input)
}

pub fn parse_column_align(input: &str) -> IResult<&str, ColumnAlign> {
    alt((
        value(ColumnAlign::Left, tag_no_case("left")),
        value(ColumnAlign::Center, tag_no_case("center")),
        value(ColumnAlign::Right, tag_no_case("right")),
    ))
    .parse(input)
}

pub fn parse_row_align(input: &str) -> IResult<&str, RowAlign> {
    alt((
        value(RowAlign::Baseline, tag_no_case("baseline")),
        value(RowAlign::Top, tag_no_case("top")),
        value(RowAlign::Bottom, tag_no_case("bottom")),
        value(RowAlign::Center, tag_no_case("center")),
        value(RowAlign::Axis, tag_no_case("axis")),
    ))
    .parse(input)
}

/// Parses a table alignment with an optional pivot row (e.g., "top -1").
pub fn parse_table_align(input: &str) -> IResult<&str, TableAlign> {
    map(
        (parse_row_align, opt(preceded(multispace1, parse_i32))),
        |(align, row)| TableAlign { align, row },
    )
    .parse(input)
}

pub fn parse_bool(input: &str) -> IResult<&str, bool> {
    alt((value(true, tag_no_case("true")), value(false, tag_no_case("false")))).parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleParseError>
where
    P: Parser<&'a str, Output = T, Error = ParseError<'a>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- High-level Parse Functions ---

/// Parses a mathvariant value (e.g., "bold", "double-struck").
pub fn parse_math_variant(s: &str) -> Result<MathVariant, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "normal" => Ok(MathVariant::Normal),
        "bold" => Ok(MathVariant::Bold),
        "italic" => Ok(MathVariant::Italic),
        "bold-italic" => Ok(MathVariant::BoldItalic),
        "double-struck" => Ok(MathVariant::DoubleStruck),
        "bold-fraktur" => Ok(MathVariant::BoldFraktur),
        "script" => Ok(MathVariant::Script),
        "bold-script" => Ok(MathVariant::BoldScript),
        "fraktur" => Ok(MathVariant::Fraktur),
        "sans-serif" => Ok(MathVariant::SansSerif),
        "bold-sans-serif" => Ok(MathVariant::BoldSansSerif),
        "sans-serif-italic" => Ok(MathVariant::SansSerifItalic),
        "sans-serif-bold-italic" => Ok(MathVariant::SansSerifBoldItalic),
        "monospace" => Ok(MathVariant::Monospace),
        _ => Err(StyleParseError::InvalidValue {
            property: "mathvariant".to_string(),
            value: s.to_string(),
        }),
    }
}

macro_rules! impl_from_str {
    ($($ty:ty => $parser:expr),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = StyleParseError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    run_parser($parser, s)
                }
            }
        )*
    };
}

impl_from_str! {
    Length => parse_length,
    ColumnWidth => parse_column_width,
    LineStyle => parse_line_style,
    Side => parse_side,
    ColumnAlign => parse_column_align,
    RowAlign => parse_row_align,
    TableAlign => parse_table_align,
}

impl FromStr for MathVariant {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_math_variant(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(run_parser(parse_length, "1ex").unwrap(), Length::ex(1.0));
        assert_eq!(run_parser(parse_length, " 0.8em ").unwrap(), Length::em(0.8));
        assert_eq!(run_parser(parse_length, "25%").unwrap(), Length::percent(25.0));
        assert_eq!(run_parser(parse_length, "-.5pt").unwrap(), Length::pt(-0.5));
        assert_eq!(
            run_parser(parse_length, "2").unwrap(),
            Length::new(2.0, Unit::None)
        );
        assert!(run_parser(parse_length, "abc").is_err());
        assert!(run_parser(parse_length, "12qq").is_err());
    }

    #[test]
    fn test_parse_named_space() {
        assert_eq!(
            run_parser(parse_length, "thinmathspace").unwrap(),
            Length::space(NamedSpace::Thin)
        );
        assert_eq!(
            run_parser(parse_length, "negativeveryverythickmathspace").unwrap(),
            Length::Space { space: NamedSpace::VeryVeryThick, negative: true }
        );
    }

    #[test]
    fn test_parse_length_list() {
        let list = run_parser(parse_length_list, "1ex  2ex\t3ex").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(*list.component(5), Length::ex(3.0));
        assert!(run_parser(parse_length_list, "").is_err());
    }

    #[test]
    fn test_parse_column_width_list() {
        let widths = run_parser(list(parse_column_width), "auto fit 20% 3em").unwrap();
        assert_eq!(
            widths.as_slice(),
            &[
                ColumnWidth::Auto,
                ColumnWidth::Fit,
                ColumnWidth::Length(Length::percent(20.0)),
                ColumnWidth::Length(Length::em(3.0)),
            ]
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("dashed".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
        assert_eq!("leftoverlap".parse::<Side>().unwrap(), Side::LeftOverlap);
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("RIGHT".parse::<ColumnAlign>().unwrap(), ColumnAlign::Right);
        assert_eq!("axis".parse::<RowAlign>().unwrap(), RowAlign::Axis);
        assert!("middle".parse::<RowAlign>().is_err());
        assert!("true".parse::<LineStyle>().is_err());
        assert!(run_parser(parse_bool, "false").is_ok_and(|b| !b));
    }

    #[test]
    fn test_parse_table_align() {
        assert_eq!("axis".parse::<TableAlign>().unwrap(), TableAlign::new(RowAlign::Axis));
        assert_eq!(
            "center 2".parse::<TableAlign>().unwrap(),
            TableAlign::at_row(RowAlign::Center, 2)
        );
        assert_eq!(
            "top -1".parse::<TableAlign>().unwrap(),
            TableAlign::at_row(RowAlign::Top, -1)
        );
        assert!("top x".parse::<TableAlign>().is_err());
    }

    #[test]
    fn test_parse_math_variant() {
        assert_eq!(parse_math_variant("double-struck").unwrap(), MathVariant::DoubleStruck);
        assert!(parse_math_variant("gothic").is_err());
        assert!("bold-italic".parse::<MathVariant>().unwrap().is_bold());
    }
}
