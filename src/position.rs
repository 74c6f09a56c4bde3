use crate::cursor::{Cursor, Location};
use crate::parser::Parser;
use crate::result::ParseResult;

/// Region of input consumed by a parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Location,
    /// End position (exclusive)
    pub end: Location,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// The spanned text within `source`
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start.offset..self.end.offset).unwrap_or("")
    }
}

/// A parser combinator that captures the span of a successful parse
pub struct Position<P> {
    parser: P,
}

impl<P> Position<P> {
    pub fn new(parser: P) -> Self {
        Position { parser }
    }
}

impl<P> Parser for Position<P>
where
    P: Parser,
{
    type Output = (P::Output, Span);

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let result = self.parser.parse(start, end);
        let span = Span {
            start: start.location(),
            end: result.remainder.location(),
        };
        result.map(|value| (value, span))
    }
}

/// Extension trait to add span tracking to any parser
pub trait PositionExt: Parser + Sized {
    /// Wrap this parser to capture its span
    fn with_span(self) -> Position<Self> {
        Position::new(self)
    }
}

impl<P> PositionExt for P where P: Parser {}

/// Convenience function to create a Position combinator
pub fn position<P>(parser: P) -> Position<P> {
    Position::new(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;
    use crate::terminal::{literal, whitespace};

    #[test]
    fn test_span_of_single_literal() {
        let text = "hello world";
        let parser = position(literal("hello", "'hello'"));
        let result = parser.parse(Cursor::new(text), Cursor::end_of(text));

        let (value, span) = result.value.unwrap();
        assert_eq!(value, "hello");
        assert_eq!(span.len(), 5);
        assert_eq!(span.slice(text), "hello");
        assert_eq!(span.start, Location::START);
    }

    #[test]
    fn test_span_across_lines() {
        let text = "a\n  b";
        let parser = literal("a", "'a'")
            .then(whitespace())
            .then(literal("b", "'b'").with_span());
        let result = parser.parse(Cursor::new(text), Cursor::end_of(text));

        let (_, _, (_, span)) = result.value.unwrap();
        assert_eq!(span.start.row, 2);
        assert_eq!(span.start.col, 3);
        assert_eq!(span.end.col, 4);
        assert_eq!(span.slice(text), "b");
    }

    #[test]
    fn test_failure_has_no_span() {
        let text = "xyz";
        let parser = literal("a", "'a'").with_span();
        let result = parser.parse(Cursor::new(text), Cursor::end_of(text));
        assert!(result.value.is_none());
        assert!(result.expected.contains("'a'"));
    }

    #[test]
    fn test_empty_span() {
        let text = "x";
        let span = Span {
            start: Location::START,
            end: Location::START,
        };
        assert!(span.is_empty());
        assert_eq!(span.slice(text), "");
    }
}
