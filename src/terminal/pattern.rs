use crate::cursor::Cursor;
use crate::error::PatternError;
use crate::parser::Parser;
use crate::result::{Expected, ParseResult};
use regex::Regex;
use std::borrow::Cow;

/// Terminal that matches a regular expression anchored at the cursor
///
/// The expression is compiled as `\A(?:pattern)`, so a match elsewhere in the
/// remaining input never counts.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    label: Cow<'static, str>,
}

impl Pattern {
    pub fn new(
        pattern: &str,
        label: impl Into<Cow<'static, str>>,
    ) -> Result<Self, PatternError> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Pattern {
            regex,
            label: label.into(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Parser for Pattern {
    type Output = String;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        match self.regex.find(start.rest(&end)) {
            Some(found) => {
                ParseResult::success(found.as_str().to_string(), start.advance(found.end()))
            }
            None => ParseResult::failure(start, Expected::single(self.label.clone(), start.location())),
        }
    }
}

/// Convenience function to create a Pattern terminal
pub fn pattern(
    pattern: &str,
    label: impl Into<Cow<'static, str>>,
) -> Result<Pattern, PatternError> {
    Pattern::new(pattern, label)
}
