use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::ParseResult;

/// Parser combinator that makes a parser optional
///
/// Never fails. Yields `Some(value)` when the inner parser matches and `None`
/// without consuming input when it does not. Either way the expected labels are
/// cleared: a missing optional element is never itself an error.
///
/// Example:
/// ```
/// use pegcomb::optional::opt;
/// use pegcomb::terminal::literal;
/// use pegcomb::{Cursor, Parser};
///
/// let sign = opt(literal("-", "'-'"));
///
/// let text = "-1";
/// let result = sign.parse(Cursor::new(text), Cursor::end_of(text));
/// assert_eq!(result.value, Some(Some("-".to_string())));
///
/// let text = "1";
/// let result = sign.parse(Cursor::new(text), Cursor::end_of(text));
/// assert_eq!(result.value, Some(None));
/// assert_eq!(result.remainder.offset(), 0);
/// ```
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Optional { parser }
    }
}

impl<P> Parser for Optional<P>
where
    P: Parser,
{
    type Output = Option<P::Output>;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let result = self.parser.parse(start, end);
        match result.value {
            Some(value) => ParseResult::success(Some(value), result.remainder),
            None => ParseResult::success(None, start),
        }
    }
}

/// Convenience function to create an Optional parser
pub fn opt<P>(parser: P) -> Optional<P>
where
    P: Parser,
{
    Optional::new(parser)
}

/// Extension trait to add .optional() method support for parsers
pub trait OptionalExt: Parser + Sized {
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }
}

/// Implement OptionalExt for all parsers
impl<P> OptionalExt for P where P: Parser {}
