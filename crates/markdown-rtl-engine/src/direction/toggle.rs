use std::sync::OnceLock;

use regex::Regex;

use super::Direction;
use crate::editing::Position;
use crate::host::TextBuffer;

/// The single edit made to correct one line or cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkEdit {
    /// An opposing mark run was deleted from `from..to`.
    Removed { from: Position, to: Position },
    /// `mark` was inserted at `at`.
    Inserted { at: Position, mark: char },
}

/// Decides and performs the smallest edit that makes a span flow in the
/// desired direction.
///
/// An opposing mark left near the start of the span is removed when there is
/// one; otherwise the desired mark is inserted after the span's structural
/// prefix.
pub struct MarkToggler;

impl MarkToggler {
    /// Text before the first strong RTL character, then a run of RLM.
    fn rlm_regex() -> &'static Regex {
        static RLM_REGEX: OnceLock<Regex> = OnceLock::new();
        RLM_REGEX.get_or_init(|| {
            Regex::new(r"^([^\p{Hebrew}\p{Arabic}\p{Thaana}\p{Syriac}]*?)(\x{200F}+)")
                .expect("Invalid RLM regex")
        })
    }

    /// Shortest leading text, then a run of LRM.
    fn lrm_regex() -> &'static Regex {
        static LRM_REGEX: OnceLock<Regex> = OnceLock::new();
        LRM_REGEX.get_or_init(|| Regex::new(r"^(.*?)(\x{200E}+)").expect("Invalid LRM regex"))
    }

    /// Byte range within `text` of the opposing mark run to delete, if any.
    pub fn find_opposing(text: &str, desired: Direction) -> Option<(usize, usize)> {
        let regex = match desired {
            Direction::Ltr => Self::rlm_regex(),
            Direction::Rtl => Self::lrm_regex(),
        };
        let marks = regex.captures(text)?.get(2)?;
        Some((marks.start(), marks.end()))
    }

    /// Work out the edit for `text`, which starts at `start` in the buffer.
    pub fn plan(text: &str, start: Position, desired: Direction, prefix_len: usize) -> MarkEdit {
        let at = |offset: usize| Position::new(start.line, start.column + offset);

        if let Some((from, to)) = Self::find_opposing(text, desired) {
            return MarkEdit::Removed {
                from: at(from),
                to: at(to),
            };
        }

        MarkEdit::Inserted {
            at: at(prefix_len.min(text.len())),
            mark: desired.mark(),
        }
    }

    /// Plan the edit for `text` and apply it to `buffer`.
    pub fn apply<B: TextBuffer + ?Sized>(
        buffer: &mut B,
        text: &str,
        start: Position,
        desired: Direction,
        prefix_len: usize,
    ) -> MarkEdit {
        let edit = Self::plan(text, start, desired, prefix_len);
        match &edit {
            MarkEdit::Removed { from, to } => {
                log::debug!("removing opposing marks at {from:?}..{to:?} for {desired}");
                buffer.replace_range("", *from, Some(*to));
            }
            MarkEdit::Inserted { at, mark } => {
                log::debug!("inserting {desired} mark at {at:?}");
                buffer.replace_range(mark.encode_utf8(&mut [0; 4]), *at, None);
            }
        }
        edit
    }
}
