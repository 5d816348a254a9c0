/// A location in the document: zero-based line and byte column within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Column zero of `line`.
    pub fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

/// A selection as reported by the editor. `anchor` may come after `head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn caret(at: Position) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    /// Inclusive range of lines touched by this selection, lowest first.
    pub fn line_span(&self) -> (usize, usize) {
        let start = self.anchor.line.min(self.head.line);
        let end = self.anchor.line.max(self.head.line);
        (start, end)
    }

    /// The selection's endpoints in document order.
    pub fn ordered(&self) -> (Position, Position) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_span_normalizes_backwards_selection() {
        let sel = Selection::new(Position::new(7, 2), Position::new(3, 9));
        assert_eq!(sel.line_span(), (3, 7));
    }

    #[test]
    fn ordered_sorts_by_line_then_column() {
        let sel = Selection::new(Position::new(2, 5), Position::new(2, 1));
        assert_eq!(sel.ordered(), (Position::new(2, 1), Position::new(2, 5)));
    }

    #[test]
    fn caret_is_empty() {
        assert!(Selection::caret(Position::new(1, 1)).is_empty());
    }
}
