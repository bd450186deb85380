use nom::{
    character::complete::{char, digit0, digit1},
    combinator::{all_consuming, opt, recognize},
    sequence::pair,
    IResult,
};

use crate::error::{Error, Result};
use crate::handler::HeaderHandler;
use crate::parser::nom_error;
use crate::types::quality::QualityFactor;

/// Unsigned decimal integer.
#[derive(Debug, Clone, Copy)]
pub struct LongHandler;

impl HeaderHandler for LongHandler {
    type Value = u64;

    fn parse(&self, text: &str) -> Result<u64> {
        let (_, digits) = all_consuming(digit1::<_, nom::error::Error<&str>>)(text)
            .map_err(|e| nom_error(text, e, "number"))?;
        digits
            .parse()
            .map_err(|e| Error::wrap(format!("Invalid number {text:?}"), e))
    }

    fn to_text(&self, value: &u64) -> Result<String> {
        Ok(value.to_string())
    }
}

// qvalue = DIGIT [ "." *DIGIT ], range checked after conversion
fn qvalue(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, opt(pair(char('.'), digit0))))(input)
}

/// `q` parameter values in the range `0..=1`.
#[derive(Debug, Clone, Copy)]
pub struct QualityFactorHandler;

impl HeaderHandler for QualityFactorHandler {
    type Value = QualityFactor;

    fn parse(&self, text: &str) -> Result<QualityFactor> {
        let (_, digits) =
            all_consuming(qvalue)(text).map_err(|e| nom_error(text, e, "quality factor"))?;
        let value: f32 = digits
            .parse()
            .map_err(|e| Error::wrap(format!("Invalid quality factor {text:?}"), e))?;
        QualityFactor::new(value)
    }

    fn to_text(&self, value: &QualityFactor) -> Result<String> {
        Ok(value.to_string())
    }
}
