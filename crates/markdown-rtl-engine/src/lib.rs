/*!
 * # Per-line direction control for mixed-script markdown
 *
 * Plain text carries no direction metadata, so a renderer guesses each
 * line's direction from its first strong character. Hebrew or Arabic lines
 * that start with a Latin word, a bullet, or a number come out the wrong way
 * round. This engine fixes individual lines on request by adding or removing
 * an invisible LRM/RLM mark at the start of the line's content.
 *
 * ## Flow
 *
 * - **`input::ChordDetector`** turns Ctrl+Shift key events into a direction:
 *   releasing the right-hand modifier asks for RTL, the left-hand one for LTR.
 * - **`direction::DirectionNormalizer`** visits every line touched by the
 *   selections and skips those already flowing the right way.
 * - **`markdown::TableScanner`** routes table rows to the table's first header
 *   cell, which decides the direction of the whole table.
 * - **`direction::MarkToggler`** removes an opposing mark if there is one,
 *   otherwise inserts the desired mark after any **`markdown::PrefixMatcher`**
 *   structural prefix (bullet, checkbox, heading, quote, footnote).
 * - **`input::BracketMirror`** swaps typed brackets inside RTL lines.
 *
 * ## Host boundary
 *
 * The editor is reached only through the traits in [`host`]. [`MarkdownBuffer`]
 * implements them over an `xi_rope::Rope` with the [`FirstStrong`] oracle, so
 * the engine runs without any editor:
 *
 * ```rust
 * use markdown_rtl_engine::{Direction, DirectionNormalizer, MarkdownBuffer, TableHandling};
 *
 * let mut doc = MarkdownBuffer::new("- hello");
 * DirectionNormalizer::new(TableHandling::HeaderCell).normalize(&mut doc, Direction::Rtl);
 * assert_eq!(doc.text(), "- \u{200F}hello");
 * ```
 */

pub mod direction;
pub mod editing;
pub mod host;
pub mod input;
pub mod io;
pub mod markdown;
pub mod plugin;
pub mod settings;

// Re-export key types for easier usage
pub use direction::{
    Direction, DirectionNormalizer, FirstStrong, LRM, MarkEdit, MarkToggler, NormalizeOutcome, RLM,
    reveal_marks,
};
pub use editing::{MarkdownBuffer, Position, Selection};
pub use host::{DirectionOracle, Document, Host, TextBuffer};
pub use input::{BracketMirror, ChordDetector, InputDisposition, Key, KeyEvent, KeyLocation};
pub use io::*;
pub use markdown::{PrefixMatcher, Table, TableScanner};
pub use plugin::NativeRtl;
pub use settings::{Settings, TableHandling};
