use crate::error::{Error, Result};
use crate::handler::{HeaderHandler, LongHandler, ParameterValue, ParameterValueHandler};
use crate::handler::string::{QUOTED_STRING, QUOTED_UNQUOTED_STRING};

/// Cache-Control extension directives: a number when the value is one, text otherwise.
pub const LONG_OR_STRING: FirstOfHandler = FirstOfHandler {
    candidates: &[&LongHandler, &QUOTED_UNQUOTED_STRING],
};

/// Tries each candidate in order; the first one that succeeds wins.
///
/// Candidates are plain handlers; a failed attempt is discarded and the next one is
/// tried. Only when every candidate rejects the input is an error returned.
#[derive(Debug, Clone, Copy)]
pub struct FirstOfHandler {
    pub candidates: &'static [&'static dyn ParameterValueHandler],
}

impl FirstOfHandler {
    fn kinds(&self) -> String {
        self.candidates
            .iter()
            .map(|candidate| candidate.kind())
            .collect::<Vec<_>>()
            .join(" or ")
    }

    fn accepting(&self, value: &ParameterValue) -> Option<&'static dyn ParameterValueHandler> {
        self.candidates
            .iter()
            .copied()
            .find(|candidate| candidate.check_value("", value).is_ok())
    }
}

impl HeaderHandler for FirstOfHandler {
    type Value = ParameterValue;

    fn parse(&self, text: &str) -> Result<ParameterValue> {
        self.candidates
            .iter()
            .find_map(|candidate| candidate.parse_value(text).ok())
            .ok_or_else(|| Error::InvalidValue(format!("{text:?} is not a {}", self.kinds())))
    }

    fn check(&self, value: &ParameterValue) -> Result<()> {
        self.accepting(value).map(|_| ()).ok_or_else(|| Error::InvalidParameterType {
            name: String::new(),
            expected: "one of the candidate kinds",
            found: value.kind(),
        })
    }

    /// Text that an earlier candidate would read as another kind (`"60"` as a long) is
    /// quoted so it reads back as text.
    fn to_text(&self, value: &ParameterValue) -> Result<String> {
        let candidate = self.accepting(value).ok_or_else(|| {
            Error::InvalidValue(format!(
                "{} value cannot be written as a {}",
                value.kind(),
                self.kinds()
            ))
        })?;
        let text = candidate.value_to_text("", value)?;
        match value {
            ParameterValue::Text(raw) if self.parse(&text).ok().as_ref() != Some(value) => {
                QUOTED_STRING.to_text(raw)
            }
            _ => Ok(text),
        }
    }
}
