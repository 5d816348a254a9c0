use crate::editing::Selection;
use crate::host::Document;

const OPENING: [char; 4] = ['(', '[', '<', '{'];
const CLOSING: [char; 4] = [')', ']', '>', '}'];

/// Whether the host should still perform its own insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    PassThrough,
    Handled,
}

/// Mirrors brackets typed into right-to-left text.
///
/// In an RTL run the glyph `)` is the one that opens towards the reader, so a
/// typed `(` is replaced by `)` and vice versa. When the host auto-pairs
/// brackets the selection is wrapped in the mirrored pair instead; angle
/// brackets are never paired.
pub struct BracketMirror;

impl BracketMirror {
    /// Handle the insertion of `text` at the document's caret.
    pub fn on_insert<D: Document + ?Sized>(
        doc: &mut D,
        text: &str,
        auto_pair: bool,
    ) -> InputDisposition {
        let mut chars = text.chars();
        let (Some(typed), None) = (chars.next(), chars.next()) else {
            return InputDisposition::PassThrough;
        };
        if !OPENING.contains(&typed) && !CLOSING.contains(&typed) {
            return InputDisposition::PassThrough;
        }
        let caret = doc.position_to_offset(doc.cursor());
        if !doc.direction_at(caret).is_rtl() {
            return InputDisposition::PassThrough;
        }

        let selection = doc
            .selections()
            .first()
            .copied()
            .unwrap_or_else(|| Selection::caret(doc.cursor()));
        let (from, to) = selection.ordered();
        let from_offset = doc.position_to_offset(from);

        if let Some(i) = OPENING.iter().position(|&c| c == typed) {
            if auto_pair && typed != '<' {
                let selected = doc.range(from, to);
                let wrapped = format!("{}{selected}{}", CLOSING[i], OPENING[i]);
                doc.replace_range(&wrapped, from, Some(to));
                let anchor = doc.offset_to_position(from_offset + 1);
                let head = doc.offset_to_position(from_offset + 1 + selected.len());
                doc.set_selection(anchor, head);
                log::debug!("wrapped selection in mirrored {typed}");
            } else {
                Self::substitute(doc, CLOSING[i], selection, from_offset);
            }
        } else if let Some(i) = CLOSING.iter().position(|&c| c == typed) {
            Self::substitute(doc, OPENING[i], selection, from_offset);
        }
        InputDisposition::Handled
    }

    /// Replace the selection with `glyph` and leave the caret after it.
    fn substitute<D: Document + ?Sized>(
        doc: &mut D,
        glyph: char,
        selection: Selection,
        from_offset: usize,
    ) {
        let (from, to) = selection.ordered();
        doc.replace_range(glyph.encode_utf8(&mut [0; 4]), from, Some(to));
        let caret = doc.offset_to_position(from_offset + glyph.len_utf8());
        doc.set_selection(caret, caret);
        log::debug!("substituted mirrored {glyph}");
    }
}
