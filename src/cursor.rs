use std::cmp::Ordering;
use std::fmt;

/// Human readable position of a cursor
///
/// `row` and `col` start at 1. `col` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Byte offset into the source
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const START: Location = Location {
        offset: 0,
        row: 1,
        col: 1,
    };
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Immutable position into a text input
///
/// A cursor is a value: advancing returns a new cursor and leaves the old one
/// untouched, so combinators backtrack simply by reusing a saved copy.
/// Two cursors compare by offset only; row and column are derived.
#[derive(Clone, Copy)]
pub struct Cursor<'src> {
    source: &'src str,
    location: Location,
}

impl<'src> Cursor<'src> {
    /// Cursor at the first byte of `source`
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            location: Location::START,
        }
    }

    /// Cursor one past the last byte of `source`
    pub fn end_of(source: &'src str) -> Self {
        Cursor::new(source).advance(source.len())
    }

    /// Move forward by `n` bytes, recomputing row and column from the consumed text
    ///
    /// `n` is bounded to the remaining input and the consumed slice is taken up to
    /// the nearest char boundary, so advancing is total.
    pub fn advance(self, n: usize) -> Self {
        let from = self.location.offset;
        let mut to = from.saturating_add(n).min(self.source.len());
        while !self.source.is_char_boundary(to) {
            to -= 1;
        }

        let Location { mut row, mut col, .. } = self.location;
        for ch in self.source[from..to].chars() {
            if ch == '\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        Cursor {
            source: self.source,
            location: Location {
                offset: to,
                row,
                col,
            },
        }
    }

    pub fn offset(&self) -> usize {
        self.location.offset
    }

    pub fn row(&self) -> usize {
        self.location.row
    }

    pub fn col(&self) -> usize {
        self.location.col
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// The whole input this cursor points into
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Input between this cursor and `end`
    ///
    /// Empty when `end` is not ahead of this cursor.
    pub fn rest(&self, end: &Cursor<'src>) -> &'src str {
        let to = end.offset().min(self.source.len());
        if to <= self.offset() {
            return "";
        }
        self.source.get(self.offset()..to).unwrap_or("")
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.location.offset == other.location.offset
    }
}

impl Eq for Cursor<'_> {}

impl PartialOrd for Cursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location.offset.cmp(&other.location.offset)
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.location.offset)
            .field("row", &self.location.row)
            .field("col", &self.location.col)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_starts_at_one_one() {
        let cursor = Cursor::new("hello");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.row(), 1);
        assert_eq!(cursor.col(), 1);
    }

    #[test]
    fn test_advance_counts_columns() {
        let cursor = Cursor::new("hello").advance(3);
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.row(), 1);
        assert_eq!(cursor.col(), 4);
        assert_eq!(cursor.rest(&Cursor::end_of("hello")), "lo");
    }

    #[test]
    fn test_newline_resets_column() {
        let cursor = Cursor::new("ab\ncd").advance(4);
        assert_eq!(cursor.row(), 2);
        assert_eq!(cursor.col(), 2);
    }

    #[test]
    fn test_advance_in_steps_matches_single_advance() {
        let text = "one\ntwo\nthree";
        let stepped = Cursor::new(text).advance(2).advance(5).advance(3);
        let direct = Cursor::new(text).advance(10);
        assert_eq!(stepped.location(), direct.location());
    }

    #[test]
    fn test_columns_count_characters() {
        let text = "héllo";
        let cursor = Cursor::new(text).advance("hé".len());
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.col(), 3);
    }

    #[test]
    fn test_advance_is_bounded_by_input() {
        let cursor = Cursor::new("ab").advance(10);
        assert_eq!(cursor, Cursor::end_of("ab"));
        assert_eq!(cursor.col(), 3);
    }

    #[test]
    fn test_advance_by_max_from_mid_input() {
        let cursor = Cursor::new("ab\nc").advance(1).advance(usize::MAX);
        assert_eq!(cursor, Cursor::end_of("ab\nc"));
        assert_eq!(cursor.row(), 2);
        assert_eq!(cursor.col(), 2);
    }

    #[test]
    fn test_equality_ignores_row_and_col() {
        let text = "a\nb";
        let a = Cursor::new(text).advance(2);
        let b = Cursor::new(text).advance(1).advance(1);
        assert_eq!(a, b);
        assert!(Cursor::new(text) < a);
    }

    #[test]
    fn test_copy_independence() {
        let cursor = Cursor::new("abcd");
        let saved = cursor;
        let moved = cursor.advance(2);
        assert_eq!(saved.offset(), 0);
        assert_eq!(moved.offset(), 2);
        assert_eq!(saved.advance(1).rest(&moved), "b");
    }

    #[test]
    fn test_rest_of_empty_range() {
        let text = "abc";
        let end = Cursor::new(text).advance(1);
        assert_eq!(Cursor::new(text).advance(2).rest(&end), "");
    }

    #[test]
    fn test_end_of_empty_input() {
        let cursor = Cursor::end_of("");
        assert_eq!(cursor, Cursor::new(""));
        assert_eq!(cursor.location(), Location::START);
    }
}
