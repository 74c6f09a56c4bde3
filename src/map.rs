use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::ParseResult;

/// Parser combinator that transforms the output of a parser using a mapping function
///
/// The mapper only runs on success. Cursor and expected labels pass through as-is,
/// which is how a grammar attaches semantic actions to a syntactic match.
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        self.parser.parse(start, end).map(&self.mapper)
    }
}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, mapper)
}

/// Extension trait to add .map() method support for parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, mapper)
    }
}

/// Implement MapExt for all parsers
impl<P> MapExt for P where P: Parser {}
