use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::ParseResult;

/// Parser combinator that matches a parser at least `minimum` times, then greedily
///
/// The first `minimum` matches are mandatory. If one of them fails the whole
/// repetition fails at the cursor it started from, with the failing attempt's
/// expected labels. After that the parser is applied until it fails once. That
/// last failure is not an error and its labels are dropped.
///
/// A match that consumes nothing during the greedy phase is collected once and
/// ends the loop, so repeating an empty-matching parser terminates.
pub struct Repeat<P> {
    parser: P,
    minimum: usize,
}

impl<P> Repeat<P> {
    pub fn new(parser: P, minimum: usize) -> Self {
        Repeat { parser, minimum }
    }
}

impl<P> Parser for Repeat<P>
where
    P: Parser,
{
    type Output = Vec<P::Output>;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let mut results = Vec::new();
        let mut cursor = start;

        for _ in 0..self.minimum {
            let result = self.parser.parse(cursor, end);
            match result.value {
                Some(value) => {
                    results.push(value);
                    cursor = result.remainder;
                }
                None => return ParseResult::failure(start, result.expected),
            }
        }

        loop {
            let result = self.parser.parse(cursor, end);
            let Some(value) = result.value else {
                break;
            };
            results.push(value);
            if result.remainder == cursor {
                break;
            }
            cursor = result.remainder;
        }

        ParseResult::success(results, cursor)
    }
}

/// Convenience function to create a Repeat parser
pub fn repeat<P>(parser: P, minimum: usize) -> Repeat<P>
where
    P: Parser,
{
    Repeat::new(parser, minimum)
}

/// Zero or more occurrences
pub fn repeat0<P>(parser: P) -> Repeat<P>
where
    P: Parser,
{
    Repeat::new(parser, 0)
}

/// One or more occurrences
pub fn repeat1<P>(parser: P) -> Repeat<P>
where
    P: Parser,
{
    Repeat::new(parser, 1)
}

/// Extension trait to add .repeated() method support for parsers
pub trait RepeatExt: Parser + Sized {
    fn repeated(self, minimum: usize) -> Repeat<Self> {
        Repeat::new(self, minimum)
    }
}

/// Implement RepeatExt for all parsers
impl<P> RepeatExt for P where P: Parser {}
