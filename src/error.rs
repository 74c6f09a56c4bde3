use crate::cursor::Location;
use std::borrow::Cow;
use thiserror::Error;

/// A terminal's regular expression failed to compile
#[derive(Debug, Error)]
#[error("invalid terminal pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Mistakes made while wiring rules into a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("rule `{0}` is declared more than once")]
    DuplicateRule(Cow<'static, str>),
    #[error("rule `{0}` is already defined")]
    Redefined(Cow<'static, str>),
    #[error("rule `{0}` is declared but never defined")]
    Undefined(Cow<'static, str>),
    #[error("rule `{0}` was not declared by this grammar")]
    ForeignRule(Cow<'static, str>),
}

/// A grammar could not parse the whole input
///
/// Display renders the single diagnostic line, e.g. `expected one of number '('.`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of {}.", .expected.join(" "))]
pub struct ParseError {
    /// Labels in sorted order, without duplicates
    pub expected: Vec<String>,
    /// Where the reported labels were expected
    pub location: Location,
}

impl ParseError {
    /// The diagnostic line followed by the surrounding source lines
    ///
    /// Shows up to 2 lines before and after the failing row and points at the
    /// failing column.
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("{self}\n\n");
        for line in context_lines(source, self.location) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn context_lines(source: &str, location: Location) -> Vec<String> {
    let first = location.row.saturating_sub(2).max(1);
    let last = location.row + 2;
    let mut lines = Vec::new();

    // `split` keeps a trailing empty line so a failure after the last newline still has a row
    for (index, content) in source.split('\n').enumerate() {
        let row = index + 1;
        if row < first {
            continue;
        }
        if row > last {
            break;
        }

        let prefix = if row == location.row {
            format!("  > {row} | ")
        } else {
            format!("    {row} | ")
        };
        lines.push(format!("{prefix}{}", content.trim_end_matches('\r')));

        if row == location.row {
            let pointer_offset = prefix.len() + location.col.saturating_sub(1);
            lines.push(format!("{}^--- here", " ".repeat(pointer_offset)));
        }
    }

    lines
}
