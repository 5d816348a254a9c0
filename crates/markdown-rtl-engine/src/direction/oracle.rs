use unicode_bidi::{BidiClass, bidi_class};

use super::Direction;
use crate::host::TextBuffer;
use crate::markdown::{PrefixMatcher, TableScanner};

/// Default direction oracle: each line is its own paragraph whose base
/// direction comes from its first strong character (UAX #9, P2/P3).
///
/// A line's structural prefix renders as markup (a bullet, a checkbox, a
/// hidden heading marker) so it takes no part in the decision. Table rows take
/// the direction of the table's first header cell, which is how a table renders
/// as one block. A line with no strong character is LTR.
pub struct FirstStrong;

impl FirstStrong {
    /// Direction of the line containing `offset`.
    pub fn resolve<B: TextBuffer + ?Sized>(buffer: &B, offset: usize) -> Direction {
        let line = buffer.offset_to_position(offset).line;
        let direction = match TableScanner::new(buffer).table_at(line) {
            Some(table) => Self::detect(&table.header_cell(buffer).text),
            None => {
                let text = buffer.line(line);
                Self::detect(&text[PrefixMatcher::prefix_len(&text)..])
            }
        };
        direction.unwrap_or_default()
    }

    /// Direction of the first strong character outside any isolate, if there is one.
    pub fn detect(text: &str) -> Option<Direction> {
        let mut isolate_depth = 0usize;
        for c in text.chars() {
            match bidi_class(c) {
                BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => isolate_depth += 1,
                BidiClass::PDI => isolate_depth = isolate_depth.saturating_sub(1),
                BidiClass::L if isolate_depth == 0 => return Some(Direction::Ltr),
                BidiClass::R | BidiClass::AL if isolate_depth == 0 => {
                    return Some(Direction::Rtl);
                }
                _ => {}
            }
        }
        None
    }
}
