//! Text flow direction and the invisible marks that force it.

pub mod normalize;
pub mod oracle;
pub mod toggle;

pub use normalize::{DirectionNormalizer, NormalizeOutcome};
pub use oracle::FirstStrong;
pub use toggle::{MarkEdit, MarkToggler};

/// LEFT-TO-RIGHT MARK (U+200E).
pub const LRM: char = '\u{200E}';
/// RIGHT-TO-LEFT MARK (U+200F).
pub const RLM: char = '\u{200F}';

/// Rendered flow direction of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// The mark that forces this direction when placed before the line's content.
    pub fn mark(self) -> char {
        match self {
            Direction::Ltr => LRM,
            Direction::Rtl => RLM,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ltr => f.write_str("LTR"),
            Direction::Rtl => f.write_str("RTL"),
        }
    }
}

/// Renders direction marks visibly, for logs and terminal output.
pub fn reveal_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            LRM => out.push_str("<LRM>"),
            RLM => out.push_str("<RLM>"),
            other => out.push(other),
        }
    }
    out
}
