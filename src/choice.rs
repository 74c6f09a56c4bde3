use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::ParseResult;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// The first success wins and is returned untouched. The second parser always
/// starts from the original cursor, and its result carries the union of both
/// branches' expected labels.
pub struct Choice<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Choice<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Choice { parser1, parser2 }
    }
}

impl<P1, P2, O> Parser for Choice<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Output = O>,
{
    type Output = O;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let first = self.parser1.parse(start, end);
        if first.is_success() {
            return first;
        }

        let mut second = self.parser2.parse(start, end);
        second.expected.merge(first.expected);
        second
    }
}

/// Extension trait to add .or() method support for parsers
pub trait ChoiceExt: Parser + Sized {
    fn or<P>(self, other: P) -> Choice<Self, P>
    where
        P: Parser<Output = Self::Output>,
    {
        Choice::new(self, other)
    }
}

/// Implement ChoiceExt for all parsers
impl<P> ChoiceExt for P where P: Parser {}

/// Convenience function to create a Choice parser
pub fn choice<P1, P2, O>(parser1: P1, parser2: P2) -> Choice<P1, P2>
where
    P1: Parser<Output = O>,
    P2: Parser<Output = O>,
{
    Choice::new(parser1, parser2)
}
