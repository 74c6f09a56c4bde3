use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::{Expected, ParseResult};
use std::borrow::Cow;

/// Terminal that matches an exact piece of text
pub struct Literal {
    text: Cow<'static, str>,
    label: Cow<'static, str>,
}

impl Literal {
    pub fn new(text: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>) -> Self {
        Literal {
            text: text.into(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Parser for Literal {
    type Output = String;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        if start.rest(&end).starts_with(self.text.as_ref()) {
            ParseResult::success(self.text.to_string(), start.advance(self.text.len()))
        } else {
            ParseResult::failure(start, Expected::single(self.label.clone(), start.location()))
        }
    }
}

/// Convenience function to create a Literal terminal
pub fn literal(
    text: impl Into<Cow<'static, str>>,
    label: impl Into<Cow<'static, str>>,
) -> Literal {
    Literal::new(text, label)
}
