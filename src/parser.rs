use crate::cursor::Cursor;
use crate::result::ParseResult;
use std::marker::PhantomData;

/// Core parser trait for parser combinators
///
/// A parser is a pure function of the cursor it starts at and the cursor that
/// bounds the input. It never fails with an error: failure is a result whose
/// `value` is `None`, carrying the labels that were expected.
///
/// `Output` never borrows from the input, so the same parser can run over any
/// text and can be stored behind `dyn Parser`.
pub trait Parser {
    type Output;

    fn parse<'src>(&self, start: Cursor<'src>, end: Cursor<'src>)
    -> ParseResult<'src, Self::Output>;
}

impl<P> Parser for &P
where
    P: Parser + ?Sized,
{
    type Output = P::Output;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        (**self).parse(start, end)
    }
}

impl<P> Parser for Box<P>
where
    P: Parser + ?Sized,
{
    type Output = P::Output;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        (**self).parse(start, end)
    }
}

/// Type-erased parser, shareable across threads
pub type BoxedParser<V> = Box<dyn Parser<Output = V> + Send + Sync>;

/// Extension trait to add .boxed() method support for parsers
pub trait BoxedExt: Parser + Sized {
    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<P> BoxedExt for P where P: Parser {}

/// Parser backed by a plain function of the two cursors
pub struct FnParser<F, V> {
    f: F,
    _output: PhantomData<fn() -> V>,
}

impl<F, V> Parser for FnParser<F, V>
where
    F: for<'src> Fn(Cursor<'src>, Cursor<'src>) -> ParseResult<'src, V>,
{
    type Output = V;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        (self.f)(start, end)
    }
}

/// Wrap a function `(start, end) -> ParseResult` as a parser
pub fn from_fn<F, V>(f: F) -> FnParser<F, V>
where
    F: for<'src> Fn(Cursor<'src>, Cursor<'src>) -> ParseResult<'src, V>,
{
    FnParser {
        f,
        _output: PhantomData,
    }
}

/// Run `parser` over the whole of `text`
///
/// `None` unless the parser matches and stops exactly at the end of `text`.
pub fn parse_str<P: Parser>(parser: &P, text: &str) -> Option<P::Output> {
    let end = Cursor::end_of(text);
    let result = parser.parse(Cursor::new(text), end);
    if result.remainder != end {
        return None;
    }
    result.value
}
