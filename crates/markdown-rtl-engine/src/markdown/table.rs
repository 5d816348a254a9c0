use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::direction::{LRM, RLM};
use crate::editing::Position;
use crate::host::TextBuffer;

/// Table delimiter character; every table line starts with it.
pub const PIPE: char = '|';

/// Location of a markdown table inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Line holding the column titles.
    pub header: usize,
    /// The `|---|---|` line directly below the header.
    pub separator: usize,
    /// Body rows; empty for a header-only table.
    pub body: Range<usize>,
}

/// A slice of one table line together with where it starts in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub start: Position,
    pub text: String,
}

impl Table {
    /// One past the last line of the table.
    pub fn end(&self) -> usize {
        self.body.end
    }

    /// The first header cell: text between the first and second `|`.
    ///
    /// The whole table renders in this cell's direction.
    pub fn header_cell<B: TextBuffer + ?Sized>(&self, buffer: &B) -> Cell {
        let line = buffer.line(self.header);
        let from = line.find(PIPE).map_or(0, |i| i + PIPE.len_utf8());
        let to = line[from..].find(PIPE).map_or(line.len(), |i| from + i);
        Cell {
            start: Position::new(self.header, from),
            text: line[from..to].to_string(),
        }
    }
}

/// Whitespace and direction marks only; a mark on the line above a table
/// does not detach the table from its blank line.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == LRM || c == RLM)
}

/// Finds the markdown table, if any, that a line belongs to.
pub struct TableScanner<'a, B: TextBuffer + ?Sized> {
    buffer: &'a B,
}

impl<'a, B: TextBuffer + ?Sized> TableScanner<'a, B> {
    pub fn new(buffer: &'a B) -> Self {
        Self { buffer }
    }

    fn separator_regex() -> &'static Regex {
        static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
        SEPARATOR_REGEX.get_or_init(|| {
            Regex::new(r"^\|(?:\s*:?-+:?\s*\|?)+\s*$").expect("Invalid table separator regex")
        })
    }

    fn is_table_line(&self, line: usize) -> bool {
        line < self.buffer.line_count() && self.buffer.line(line).starts_with(PIPE)
    }

    pub fn is_separator(text: &str) -> bool {
        Self::separator_regex().is_match(text)
    }

    /// The table containing `line`.
    ///
    /// A table is a run of `|` lines preceded by a blank line or the start of
    /// the document, whose second line is a header separator.
    pub fn table_at(&self, line: usize) -> Option<Table> {
        if !self.is_table_line(line) {
            return None;
        }

        let mut top = line;
        while top > 0 && self.is_table_line(top - 1) {
            top -= 1;
        }
        if top > 0 && !is_blank(&self.buffer.line(top - 1)) {
            return None;
        }

        let separator = top + 1;
        if !self.is_table_line(separator) || !Self::is_separator(&self.buffer.line(separator)) {
            return None;
        }

        Some(Table {
            header: top,
            separator,
            body: separator + 1..self.run_end(separator),
        })
    }

    /// One past the last line of the contiguous `|` run containing `line`.
    pub fn run_end(&self, line: usize) -> usize {
        let mut end = line;
        while self.is_table_line(end) {
            end += 1;
        }
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::MarkdownBuffer;
    use rstest::rstest;

    const DOC: &str = "intro\n\n| Name | Age |\n|---|---|\n| Bob | 4 |\n| Ann | 5 |\n\nafter";

    #[rstest]
    #[case::header(2)]
    #[case::separator(3)]
    #[case::first_row(4)]
    #[case::last_row(5)]
    fn every_table_line_finds_the_header(#[case] line: usize) {
        let buf = MarkdownBuffer::new(DOC);
        let table = TableScanner::new(&buf).table_at(line).unwrap();
        assert_eq!(
            table,
            Table {
                header: 2,
                separator: 3,
                body: 4..6,
            }
        );
        assert!((table.header..table.end()).contains(&line));
    }

    #[rstest]
    #[case::prose(0)]
    #[case::blank(1)]
    #[case::after(7)]
    #[case::out_of_bounds(40)]
    fn non_table_lines_are_rejected(#[case] line: usize) {
        let buf = MarkdownBuffer::new(DOC);
        assert_eq!(TableScanner::new(&buf).table_at(line), None);
    }

    #[test]
    fn table_at_document_start() {
        let buf = MarkdownBuffer::new("| A | B |\n| :-: | --- |\n| 1 | 2 |");
        let table = TableScanner::new(&buf).table_at(2).unwrap();
        assert_eq!(table.header, 0);
        assert_eq!(table.body, 2..3);
    }

    #[test]
    fn marked_blank_line_still_separates() {
        let buf = MarkdownBuffer::new("text\n\u{200F}\n| A |\n|---|");
        let table = TableScanner::new(&buf).table_at(3).unwrap();
        assert_eq!(table.header, 2);
    }

    #[test]
    fn requires_blank_line_above() {
        let buf = MarkdownBuffer::new("text\n| A |\n|---|");
        assert_eq!(TableScanner::new(&buf).table_at(1), None);
    }

    #[test]
    fn requires_separator_below_header() {
        let buf = MarkdownBuffer::new("\n| A |\n| B |\n|---|");
        assert_eq!(TableScanner::new(&buf).table_at(3), None);
    }

    #[test]
    fn header_only_table_has_empty_body() {
        let buf = MarkdownBuffer::new("| A |\n|---|");
        let table = TableScanner::new(&buf).table_at(0).unwrap();
        assert!(table.body.is_empty());
        assert_eq!(table.end(), 2);
    }

    #[rstest]
    #[case("|---|---|", true)]
    #[case("| --- | :---: | ---: |", true)]
    #[case("|:-", true)]
    #[case("| Name | Age |", false)]
    #[case("|", false)]
    #[case("---", false)]
    fn recognises_separators(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(TableScanner::<MarkdownBuffer>::is_separator(text), expected);
    }

    #[test]
    fn header_cell_spans_first_column() {
        let buf = MarkdownBuffer::new("| Name | Age |\n|---|---|");
        let table = TableScanner::new(&buf).table_at(0).unwrap();
        let cell = table.header_cell(&buf);
        assert_eq!(cell.start, Position::new(0, 1));
        assert_eq!(cell.text, " Name ");
    }

    #[test]
    fn header_cell_without_closing_pipe_runs_to_line_end() {
        let buf = MarkdownBuffer::new("| Name\n|---");
        let table = TableScanner::new(&buf).table_at(0).unwrap();
        assert_eq!(table.header_cell(&buf).text, " Name");
    }
}
