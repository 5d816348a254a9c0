use super::{Direction, MarkEdit, MarkToggler};
use crate::editing::Position;
use crate::host::Document;
use crate::markdown::{PIPE, PrefixRule, TableScanner};
use crate::settings::TableHandling;

/// What a normalization pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub lines_checked: usize,
    pub marks_inserted: usize,
    pub marks_removed: usize,
    pub tables_corrected: usize,
    /// Tables left untouched because table handling is set to refuse.
    pub tables_refused: usize,
}

impl NormalizeOutcome {
    pub fn changed(&self) -> bool {
        self.marks_inserted + self.marks_removed > 0
    }

    fn record(&mut self, edit: &MarkEdit) {
        match edit {
            MarkEdit::Inserted { .. } => self.marks_inserted += 1,
            MarkEdit::Removed { .. } => self.marks_removed += 1,
        }
    }
}

/// Makes every line touched by the document's selections flow in one direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionNormalizer {
    tables: TableHandling,
}

impl DirectionNormalizer {
    pub fn new(tables: TableHandling) -> Self {
        Self { tables }
    }

    /// Correct each selected line whose rendered direction differs from `desired`.
    ///
    /// Lines already flowing the right way are left alone, so running this twice
    /// changes nothing the second time. A table is corrected once, through its
    /// first header cell, whichever of its rows was selected.
    pub fn normalize<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        desired: Direction,
    ) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();

        for selection in doc.selections() {
            let (start, end) = selection.line_span();
            let end = end.min(doc.line_count().saturating_sub(1));
            let mut line = start;
            while line <= end {
                outcome.lines_checked += 1;
                let offset = doc.position_to_offset(Position::line_start(line));
                if doc.direction_at(offset) == desired {
                    log::trace!("line {line} already flows {desired}");
                    line += 1;
                    continue;
                }
                line = self.correct_line(&mut *doc, line, desired, &mut outcome);
            }
        }

        outcome
    }

    /// Correct one line and return the next line to look at.
    fn correct_line<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        line: usize,
        desired: Direction,
        outcome: &mut NormalizeOutcome,
    ) -> usize {
        let text = doc.line(line);

        if self.tables == TableHandling::Refuse && text.starts_with(PIPE) {
            log::debug!("leaving table at line {line} untouched");
            outcome.tables_refused += 1;
            return TableScanner::new(&*doc).run_end(line);
        }

        match TableScanner::new(&*doc).table_at(line) {
            Some(table) => {
                let cell = table.header_cell(&*doc);
                let prefix = PrefixRule::Whitespace.prefix_len(&cell.text);
                let edit = MarkToggler::apply(&mut *doc, &cell.text, cell.start, desired, prefix);
                outcome.record(&edit);
                outcome.tables_corrected += 1;
                table.end()
            }
            None => {
                let prefix = PrefixRule::Markdown.prefix_len(&text);
                let start = Position::line_start(line);
                let edit = MarkToggler::apply(&mut *doc, &text, start, desired, prefix);
                outcome.record(&edit);
                line + 1
            }
        }
    }
}
