//! nom parsers for textual dimension values.
//!
//! Accepted forms are a plain number (points), a number suffixed with `pt`
//! (points), a number suffixed with `%` (fraction of the parent) and the
//! keyword `auto`. Surrounding whitespace is ignored.

use crate::dimension::{Dimension, DimensionUnit};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1};
use nom::combinator::{map_res, opt, recognize, value};
use nom::{IResult, Parser};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// Text could not be turned into a dimension. Recoverable.
    #[error("malformed dimension '{input}': {reason}")]
    Malformed { input: String, reason: String },

    /// A unit/value combination that breaks the dimension invariants.
    #[error("invalid value {value} for {unit} dimension")]
    InvalidValue { unit: DimensionUnit, value: f32 },
}

impl DimensionError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        DimensionError::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

// --- Helper Parsers ---

/// Recognises a signed decimal number and returns its text.
fn parse_number(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(alt((char('+'), char('-')))),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
    ))
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, DimensionUnit> {
    alt((
        value(DimensionUnit::Fraction, char('%')),
        value(DimensionUnit::Points, tag_no_case("pt")),
    ))
    .parse(input)
}

// --- Dimension Parsers ---

/// Parses a number with an optional unit tag. Percentages are returned as
/// fractions.
pub fn parse_quantity(input: &str) -> IResult<&str, (DimensionUnit, f32)> {
    map_res(
        (parse_number, opt(parse_unit)),
        |(number, unit): (&str, Option<DimensionUnit>)| match unit.unwrap_or(DimensionUnit::Points) {
            // Shift the exponent in the text so the value is rounded only once.
            DimensionUnit::Fraction => format!("{number}e-2")
                .parse::<f32>()
                .map(|fraction| (DimensionUnit::Fraction, fraction)),
            unit => number.parse::<f32>().map(|value| (unit, value)),
        },
    )
    .parse(input)
}

/// Parses either the `auto` keyword or a quantity.
pub fn parse_dimension(input: &str) -> IResult<&str, (DimensionUnit, f32)> {
    alt((
        value((DimensionUnit::Auto, 0.0), tag_no_case("auto")),
        parse_quantity,
    ))
    .parse(input)
}

/// Runs a parser over the whole (trimmed) input, rejecting leftovers.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, DimensionError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(DimensionError::malformed(
            input,
            format!("unexpected trailing content '{}'", rem),
        )),
        Err(e) => Err(DimensionError::malformed(input, e.to_string())),
    }
}

/// Parses a complete dimension string and validates the result.
pub(crate) fn parse_dimension_str(text: &str) -> Result<Dimension, DimensionError> {
    let (unit, value) = run_parser(parse_dimension, text)?;
    Dimension::try_new(unit, value).map_err(|e| DimensionError::malformed(text, e.to_string()))
}
