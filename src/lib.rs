//! # PegComb - PEG Parser Combinator Library
//!
//! Build backtracking recursive-descent parsers directly from expressions, without
//! a separate grammar compiler.
//!
//! Every combinator is a pure function of a start [`Cursor`] and an end cursor
//! returning a [`ParseResult`]: an optional value, the cursor where matching
//! stopped, and the set of labels that were expected on the failing path.
//!
//! - **Terminals** match literals, anchored regular expressions or character runs
//! - **Combinators** compose them: `map`, `then` (flat tuples), `or` (ordered
//!   choice), `optional`, `repeated`
//! - **Grammars** tie named, mutually recursive [`Rule`]s together and require the
//!   start rule to consume the whole input
//!
//! Left recursion is not supported: a left-recursive rule recurses without bound.

pub mod choice;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lazy;
pub mod map;
pub mod optional;
pub mod parser;
pub mod position;
pub mod repeat;
pub mod result;
pub mod rule;
pub mod sequence;
pub mod terminal;

pub use choice::{ChoiceExt, choice};
pub use cursor::{Cursor, Location};
pub use error::{GrammarError, ParseError, PatternError};
pub use grammar::{DiagnosticMode, Grammar, GrammarBuilder};
pub use lazy::lazy;
pub use map::{MapExt, map};
pub use optional::{OptionalExt, opt};
pub use parser::{BoxedExt, BoxedParser, Parser, from_fn};
pub use position::{PositionExt, Span, position};
pub use repeat::{RepeatExt, repeat, repeat0, repeat1};
pub use result::{Expectation, Expected, ParseResult};
pub use rule::Rule;
pub use sequence::{SequenceExt, seq};
pub use terminal::{literal, pattern, take_while1, whitespace};
