//! Terminal matchers
//!
//! Terminals are the leaves of a grammar. Each one is anchored at the cursor it
//! is invoked with: on success it yields the matched text and advances past it,
//! on failure it consumes nothing and reports its label as expected.

pub mod chars;
pub mod literal;
pub mod pattern;

pub use chars::{TakeWhile, take_while1, whitespace};
pub use literal::{Literal, literal};
pub use pattern::{Pattern, pattern};
