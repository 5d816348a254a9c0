pub mod buffer;
pub mod position;

pub use buffer::MarkdownBuffer;
pub use position::{Position, Selection};
