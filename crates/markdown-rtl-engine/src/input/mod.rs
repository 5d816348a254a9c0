//! Host input events: the Ctrl+Shift direction chord and bracket typing.

pub mod brackets;
pub mod chord;
pub mod keys;

pub use brackets::{BracketMirror, InputDisposition};
pub use chord::{ChordDetector, ChordState};
pub use keys::{Key, KeyEvent, KeyLocation, Modifiers};
