use std::sync::OnceLock;

use regex::Regex;

/// Which leading text a direction mark has to stay behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// Markdown block syntax at the start of a line.
    Markdown,
    /// Only leading whitespace, as inside a table cell.
    Whitespace,
}

impl PrefixRule {
    /// Byte length of the prefix this rule finds at the start of `text`.
    pub fn prefix_len(self, text: &str) -> usize {
        match self {
            PrefixRule::Markdown => PrefixMatcher::prefix_len(text),
            PrefixRule::Whitespace => text.len() - text.trim_start().len(),
        }
    }
}

/// Recognises the markdown structural prefix of a line.
///
/// Bullets (`-`, `*`) with an optional checkbox, ordered-list markers, heading
/// hashes, blockquote markers and footnote definitions all render before the
/// line's content, so a direction mark belongs after them. At most one prefix
/// is matched and the whitespace following it is part of the prefix.
pub struct PrefixMatcher;

impl PrefixMatcher {
    fn regex() -> &'static Regex {
        static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
        PREFIX_REGEX.get_or_init(|| {
            Regex::new(
                r"^(?:\s*[-*](?:\s+\[[^\[\]]\])?|\s*[0-9]+[.)]|#+|\s*>|\[\^[0-9]+\]:\s*)\s+",
            )
            .expect("Invalid structural prefix regex")
        })
    }

    /// Length in bytes of the structural prefix of `line`, or 0 when there is none.
    pub fn prefix_len(line: &str) -> usize {
        Self::regex().find(line).map_or(0, |m| m.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("hello", 0)]
    #[case::dash_bullet("- item", 2)]
    #[case::star_bullet("* item", 2)]
    #[case::indented_bullet("    - item", 6)]
    #[case::open_checkbox("- [ ] task", 6)]
    #[case::done_checkbox("- [x] task", 6)]
    #[case::ordered_dot("1. first", 3)]
    #[case::ordered_paren("12) twelfth", 4)]
    #[case::indented_ordered("  3. third", 5)]
    #[case::heading("## Title", 3)]
    #[case::quote("> quoted", 2)]
    #[case::callout("> [!note] callout", 2)]
    #[case::footnote("[^1]: note", 6)]
    #[case::extra_spaces("-   spaced", 4)]
    #[case::hash_without_space("#tag", 0)]
    #[case::dash_without_space("-item", 0)]
    #[case::bare_number("2024 was a year", 0)]
    #[case::empty("", 0)]
    fn matches_structural_prefixes(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(PrefixMatcher::prefix_len(line), expected);
    }

    #[test]
    fn prefix_is_followed_by_hebrew() {
        let line = "- [ ] משימה";
        let len = PrefixMatcher::prefix_len(line);
        assert_eq!(&line[..len], "- [ ] ");
    }

    #[test]
    fn whitespace_rule_only_skips_spaces() {
        assert_eq!(PrefixRule::Whitespace.prefix_len("  - Name "), 2);
        assert_eq!(PrefixRule::Whitespace.prefix_len("Name"), 0);
        assert_eq!(PrefixRule::Markdown.prefix_len("  - Name "), 4);
    }
}
