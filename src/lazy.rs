use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::ParseResult;

/// A lazy parser that defers the construction of the actual parser until parse time.
/// This is useful for breaking recursion between parsers built by plain functions.
pub struct Lazy<F> {
    factory: F,
}

impl<F, P> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    /// Create a new lazy parser with the given factory function
    pub fn new(factory: F) -> Self {
        Lazy { factory }
    }
}

impl<F, P> Parser for Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    type Output = P::Output;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let parser = (self.factory)();
        parser.parse(start, end)
    }
}

/// Create a lazy parser from a factory function
pub fn lazy<F, P>(factory: F) -> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    Lazy::new(factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ChoiceExt;
    use crate::map::MapExt;
    use crate::parser::{BoxedExt, BoxedParser};
    use crate::sequence::SequenceExt;
    use crate::terminal::literal;

    /// nested := "(" nested ")" | ""
    fn nested() -> BoxedParser<usize> {
        literal("(", "'('")
            .then(lazy(nested))
            .then(literal(")", "')'"))
            .map(|(_, depth, _)| depth + 1)
            .or(literal("", "nothing").map(|_| 0))
            .boxed()
    }

    #[test]
    fn test_lazy_basic() {
        let parser = lazy(|| literal("a", "'a'"));
        let text = "aaaa";
        let result = parser.parse(Cursor::new(text), Cursor::end_of(text));

        assert_eq!(result.value.as_deref(), Some("a"));
        assert_eq!(result.remainder.offset(), 1);
    }

    #[test]
    fn test_lazy_recursion() {
        let text = "((()))";
        let result = nested().parse(Cursor::new(text), Cursor::end_of(text));
        assert_eq!(result.value, Some(3));
        assert_eq!(result.remainder, Cursor::end_of(text));
    }

    #[test]
    fn test_lazy_recursion_unbalanced() {
        let text = "(()";
        let result = nested().parse(Cursor::new(text), Cursor::end_of(text));
        // The outer "(" cannot close, so the empty alternative wins
        assert_eq!(result.value, Some(0));
        assert_eq!(result.remainder.offset(), 0);
        assert!(result.expected.contains("')'"));
    }
}
