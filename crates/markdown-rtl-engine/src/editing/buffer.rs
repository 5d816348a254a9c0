use std::borrow::Cow;

use xi_rope::Rope;

use crate::direction::{Direction, FirstStrong};
use crate::editing::{Position, Selection};
use crate::host::{DirectionOracle, TextBuffer};

/// A selection stored as byte offsets into the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OffsetSelection {
    anchor: usize,
    head: usize,
}

/// In-memory markdown document backed by an `xi_rope::Rope`.
///
/// The rope is the single source of truth: saving returns its bytes verbatim,
/// so inserted or removed marks are the only difference a normalization makes.
/// Selections are kept as byte offsets and mapped through every edit.
///
/// Direction queries are answered by [`FirstStrong`], which reads the same
/// rope, so the oracle always sees the effect of the last edit.
#[derive(Debug, Clone)]
pub struct MarkdownBuffer {
    buffer: Rope,
    selections: Vec<OffsetSelection>,
    version: u64,
}

impl MarkdownBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selections: vec![OffsetSelection { anchor: 0, head: 0 }],
            version: 0,
        }
    }

    /// Create a buffer from raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, std::str::Utf8Error> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Exact document content.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Incremented on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace every selection at once. An empty list leaves a caret at the start.
    pub fn set_selections(&mut self, selections: &[Selection]) {
        self.selections = selections
            .iter()
            .map(|sel| OffsetSelection {
                anchor: self.position_to_offset(sel.anchor),
                head: self.position_to_offset(sel.head),
            })
            .collect();
        if self.selections.is_empty() {
            self.selections.push(OffsetSelection { anchor: 0, head: 0 });
        }
    }

    /// Builder form of [`MarkdownBuffer::set_selections`].
    pub fn with_selections(mut self, selections: &[Selection]) -> Self {
        self.set_selections(selections);
        self
    }

    /// Byte range of `line` without its terminator.
    fn line_bounds(&self, line: usize) -> (usize, usize) {
        let count = self.line_count();
        if line >= count {
            let end = self.buffer.len();
            return (end, end);
        }
        let start = self.buffer.offset_of_line(line);
        let mut end = if line + 1 < count {
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.buffer.len()
        };
        if end > start && self.buffer.byte_at(end - 1) == b'\r' {
            end -= 1;
        }
        (start, end)
    }

    fn slice(&self, start: usize, end: usize) -> Cow<'_, str> {
        self.buffer.slice_to_cow(start..end)
    }

    /// Map a selection offset through the replacement of `start..end` by `inserted` bytes.
    fn map_offset(offset: usize, start: usize, end: usize, inserted: usize) -> usize {
        if offset < start {
            offset
        } else if offset >= end && offset > start {
            offset - (end - start) + inserted
        } else {
            start
        }
    }
}

impl TextBuffer for MarkdownBuffer {
    fn line(&self, index: usize) -> String {
        let (start, end) = self.line_bounds(index);
        self.slice(start, end).into_owned()
    }

    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn range(&self, from: Position, to: Position) -> String {
        let a = self.position_to_offset(from);
        let b = self.position_to_offset(to);
        self.slice(a.min(b), a.max(b)).into_owned()
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let a = self.position_to_offset(from);
        let b = to.map_or(a, |to| self.position_to_offset(to));
        let (start, end) = (a.min(b), a.max(b));

        self.buffer.edit(start..end, text);
        for sel in &mut self.selections {
            sel.anchor = Self::map_offset(sel.anchor, start, end, text.len());
            sel.head = Self::map_offset(sel.head, start, end, text.len());
        }
        self.version += 1;
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections
            .iter()
            .map(|sel| Selection {
                anchor: self.offset_to_position(sel.anchor),
                head: self.offset_to_position(sel.head),
            })
            .collect()
    }

    /// Lines past the end clamp to the document end; columns clamp to the line length.
    fn position_to_offset(&self, pos: Position) -> usize {
        let (start, end) = self.line_bounds(pos.line);
        (start + pos.column).min(end)
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.buffer.line_of_offset(offset);
        Position {
            line,
            column: offset - self.buffer.offset_of_line(line),
        }
    }

    fn cursor(&self) -> Position {
        let head = self.selections.first().map_or(0, |sel| sel.head);
        self.offset_to_position(head)
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        self.set_selections(&[Selection::new(anchor, head)]);
    }
}

impl DirectionOracle for MarkdownBuffer {
    fn direction_at(&self, offset: usize) -> Direction {
        FirstStrong::resolve(self, offset)
    }
}
