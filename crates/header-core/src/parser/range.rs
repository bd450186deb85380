//! nom parsers for the byte range headers (RFC 7233).
//!
//! ```text
//! Range         = range-unit "=" range-set
//! range-set     = 1#( first-pos "-" [ last-pos ] / "-" suffix-length )
//! Content-Range = range-unit SP ( first-pos "-" last-pos / "*" ) "/" ( complete-length / "*" )
//! ```

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::parser::chars;
use crate::types::range::RangeSpec;

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Parsed `Content-Range` parts: unit, optional `first-last`, optional complete length.
pub(crate) type ContentRangeParts<'a> = (&'a str, Option<(u64, u64)>, Option<u64>);

fn range_unit(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c| chars::RFC7230_TOKEN.test(c))(input)
}

fn number(input: &str) -> ParseResult<'_, u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>())(input)
}

fn range_spec(input: &str) -> ParseResult<'_, RangeSpec> {
    alt((
        map(preceded(char('-'), number), |length| RangeSpec::Suffix { length }),
        map(pair(terminated(number, char('-')), opt(number)), |(first, last)| match last {
            Some(last) => RangeSpec::Bounded { first, last },
            None => RangeSpec::From { first },
        }),
    ))(input)
}

fn list_separator(input: &str) -> ParseResult<'_, char> {
    delimited(space0, char(','), space0)(input)
}

/// The complete `Range` header: unit and one or more specs.
pub(crate) fn range(input: &str) -> ParseResult<'_, (&str, Vec<RangeSpec>)> {
    all_consuming(delimited(
        space0,
        separated_pair(
            range_unit,
            char('='),
            preceded(space0, separated_list1(list_separator, range_spec)),
        ),
        space0,
    ))(input)
}

/// The complete `Content-Range` header.
pub(crate) fn content_range(input: &str) -> ParseResult<'_, ContentRangeParts<'_>> {
    all_consuming(delimited(
        space0,
        tuple((
            terminated(range_unit, space1),
            alt((map(separated_pair(number, char('-'), number), Some), value(None, char('*')))),
            preceded(char('/'), alt((map(number, Some), value(None, char('*'))))),
        )),
        space0,
    ))(input)
}
