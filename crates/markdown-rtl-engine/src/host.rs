//! The narrow surface through which the engine talks to an editor.
//!
//! Everything the direction engine needs from its host is expressed here as
//! traits. `MarkdownBuffer` implements the document traits for in-memory use;
//! a real editor integration implements them over its own view model.

use std::time::Duration;

use crate::direction::Direction;
use crate::editing::{Position, Selection};

/// Reports the rendered direction in effect at a byte offset of the live document.
pub trait DirectionOracle {
    fn direction_at(&self, offset: usize) -> Direction;
}

/// Line-indexed access to an editable document.
///
/// Columns are byte offsets into the line as returned by [`TextBuffer::line`],
/// which never includes the line terminator.
pub trait TextBuffer {
    fn line(&self, index: usize) -> String;
    fn line_count(&self) -> usize;
    fn range(&self, from: Position, to: Position) -> String;
    /// Replaces `from..to` with `text`; with `to` absent this is an insertion at `from`.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);
    fn selections(&self) -> Vec<Selection>;
    fn position_to_offset(&self, pos: Position) -> usize;
    fn offset_to_position(&self, offset: usize) -> Position;
    fn cursor(&self) -> Position;
    fn set_selection(&mut self, anchor: Position, head: Position);
}

/// A document the engine can both read directions from and edit.
pub trait Document: TextBuffer + DirectionOracle {}

impl<T: TextBuffer + DirectionOracle + ?Sized> Document for T {}

/// The application hosting the engine.
pub trait Host {
    type Doc: Document;

    /// The document currently focused for editing, if any.
    fn active_document(&mut self) -> Option<&mut Self::Doc>;

    /// Fire-and-forget user feedback.
    fn show_transient_notice(&mut self, message: &str, duration: Duration);

    /// Whether the host closes brackets automatically when one is typed.
    fn auto_pair_enabled(&self) -> bool;
}
