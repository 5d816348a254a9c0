//! Markdown line structure relevant to direction marks.

pub mod prefix;
pub mod table;

pub use prefix::{PrefixMatcher, PrefixRule};
pub use table::{Cell, PIPE, Table, TableScanner};
