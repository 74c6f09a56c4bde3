use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::result::{Expected, ParseResult};

/// Parser combinator that runs a tuple of parsers one after another
///
/// The output is a flat tuple with one element per parser, so `a.then(b).then(c)`,
/// `seq((a, b)).then(c)` and `seq((a, b, c))` all produce `(a, b, c)`. Sequences of
/// up to 8 parsers are supported.
///
/// A failing element ends the sequence right away and its result is forwarded
/// as-is: its remainder and its expected labels. Nothing after it runs.
///
/// Example:
/// ```
/// use pegcomb::sequence::SequenceExt;
/// use pegcomb::terminal::{literal, pattern};
/// use pegcomb::{Cursor, Parser};
///
/// let number = || pattern("[0-9]+", "number").unwrap();
/// let parser = number().then(literal("+", "'+'")).then(number());
///
/// let text = "1+2";
/// let result = parser.parse(Cursor::new(text), Cursor::end_of(text));
/// assert_eq!(
///     result.value,
///     Some(("1".to_string(), "+".to_string(), "2".to_string()))
/// );
/// ```
pub struct Sequence<T> {
    parsers: T,
}

impl<T> Sequence<T> {
    pub fn new(parsers: T) -> Self {
        Sequence { parsers }
    }
}

macro_rules! sequence_parser {
    ($($P:ident $p:ident $v:ident),+) => {
        impl<$($P),+> Parser for Sequence<($($P,)+)>
        where
            $($P: Parser,)+
        {
            type Output = ($($P::Output,)+);

            #[allow(unused_assignments)]
            fn parse<'src>(
                &self,
                start: Cursor<'src>,
                end: Cursor<'src>,
            ) -> ParseResult<'src, Self::Output> {
                let ($($p,)+) = &self.parsers;
                let mut cursor = start;
                let mut expected = Expected::new();
                $(
                    let result = $p.parse(cursor, end);
                    let $v = match result.value {
                        Some(value) => value,
                        None => return ParseResult::failure(result.remainder, result.expected),
                    };
                    cursor = result.remainder;
                    expected = result.expected;
                )+
                ParseResult::success(($($v,)+), cursor).with_expected(expected)
            }
        }
    };
}

sequence_parser!(P1 p1 v1, P2 p2 v2);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3, P4 p4 v4);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3, P4 p4 v4, P5 p5 v5);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3, P4 p4 v4, P5 p5 v5, P6 p6 v6);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3, P4 p4 v4, P5 p5 v5, P6 p6 v6, P7 p7 v7);
sequence_parser!(P1 p1 v1, P2 p2 v2, P3 p3 v3, P4 p4 v4, P5 p5 v5, P6 p6 v6, P7 p7 v7, P8 p8 v8);

// Extending a sequence appends to its tuple instead of nesting it. Inherent
// methods win over `SequenceExt::then`, which covers every other parser.
macro_rules! sequence_then {
    ($($P:ident $p:ident),+) => {
        impl<$($P),+> Sequence<($($P,)+)> {
            pub fn then<Q>(self, next: Q) -> Sequence<($($P,)+ Q)> {
                let ($($p,)+) = self.parsers;
                Sequence::new(($($p,)+ next))
            }
        }
    };
}

sequence_then!(P1 p1, P2 p2);
sequence_then!(P1 p1, P2 p2, P3 p3);
sequence_then!(P1 p1, P2 p2, P3 p3, P4 p4);
sequence_then!(P1 p1, P2 p2, P3 p3, P4 p4, P5 p5);
sequence_then!(P1 p1, P2 p2, P3 p3, P4 p4, P5 p5, P6 p6);
sequence_then!(P1 p1, P2 p2, P3 p3, P4 p4, P5 p5, P6 p6, P7 p7);

/// Convenience function to create a Sequence from a tuple of parsers
pub fn seq<T>(parsers: T) -> Sequence<T> {
    Sequence::new(parsers)
}

/// Extension trait to add .then() method support for parsers
pub trait SequenceExt: Parser + Sized {
    fn then<P>(self, next: P) -> Sequence<(Self, P)>
    where
        P: Parser,
    {
        Sequence::new((self, next))
    }
}

/// Implement SequenceExt for all parsers
impl<P> SequenceExt for P where P: Parser {}
