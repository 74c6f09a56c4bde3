use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::{Expected, ParseResult};
use std::borrow::Cow;

/// Terminal that matches one or more characters satisfying a predicate
pub struct TakeWhile<F> {
    predicate: F,
    label: Cow<'static, str>,
}

impl<F> TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    pub fn new(predicate: F, label: impl Into<Cow<'static, str>>) -> Self {
        TakeWhile {
            predicate,
            label: label.into(),
        }
    }
}

impl<F> Parser for TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    type Output = String;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let rest = start.rest(&end);
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !(self.predicate)(ch))
            .map_or(rest.len(), |(i, _)| i);

        if len == 0 {
            return ParseResult::failure(start, Expected::single(self.label.clone(), start.location()));
        }
        ParseResult::success(rest[..len].to_string(), start.advance(len))
    }
}

/// Convenience function to create a TakeWhile terminal
pub fn take_while1<F>(predicate: F, label: impl Into<Cow<'static, str>>) -> TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    TakeWhile::new(predicate, label)
}

/// One or more Unicode whitespace characters
pub fn whitespace() -> TakeWhile<fn(char) -> bool> {
    TakeWhile::new(char::is_whitespace as fn(char) -> bool, "whitespace")
}
