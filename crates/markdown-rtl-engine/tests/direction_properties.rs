//! Behavioural properties of direction normalization over whole documents.

use markdown_rtl_engine::{
    Direction, DirectionNormalizer, DirectionOracle, MarkdownBuffer, Position, PrefixMatcher,
    Selection, TableHandling, TextBuffer, reveal_marks,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn normalize(doc: &mut MarkdownBuffer, desired: Direction) {
    DirectionNormalizer::new(TableHandling::HeaderCell).normalize(doc, desired);
}

fn whole_document(doc: &MarkdownBuffer) -> Selection {
    let last = doc.line_count() - 1;
    Selection::new(Position::new(0, 0), Position::new(last, 0))
}

fn line_direction(doc: &MarkdownBuffer, line: usize) -> Direction {
    doc.direction_at(doc.position_to_offset(Position::line_start(line)))
}

#[rstest]
#[case::latin("hello world")]
#[case::hebrew("שלום עולם")]
#[case::arabic("مرحبا بالعالم")]
#[case::bullet_hebrew("- רשימה with English")]
#[case::checkbox_latin("- [ ] task")]
#[case::ordered_hebrew("1. פריט")]
#[case::heading("## כותרת")]
#[case::quote("> ציטוט")]
#[case::footnote("[^2]: הערה")]
#[case::digits_first("2024 שנה")]
#[case::empty("")]
fn normalization_is_idempotent(
    #[case] line: &str,
    #[values(Direction::Ltr, Direction::Rtl)] desired: Direction,
) {
    let mut once = MarkdownBuffer::new(line);
    normalize(&mut once, desired);

    let mut twice = once.clone();
    normalize(&mut twice, desired);

    assert_eq!(twice.text(), once.text());
    assert_eq!(line_direction(&once, 0), desired);
}

#[rstest]
#[case::latin("hello")]
#[case::bullet("- item")]
#[case::checkbox("* [x] done")]
#[case::heading("# Title")]
#[case::numbers("3) three")]
fn rtl_then_ltr_restores_latin_lines(#[case] line: &str) {
    let mut doc = MarkdownBuffer::new(line);
    normalize(&mut doc, Direction::Rtl);
    assert_ne!(doc.text(), line);
    normalize(&mut doc, Direction::Ltr);
    assert_eq!(doc.text(), line);
}

#[rstest]
#[case::hebrew("שלום")]
#[case::bullet("- פריט")]
#[case::quote("> ציטוט")]
fn ltr_then_rtl_restores_hebrew_lines(#[case] line: &str) {
    let mut doc = MarkdownBuffer::new(line);
    normalize(&mut doc, Direction::Ltr);
    normalize(&mut doc, Direction::Rtl);
    assert_eq!(doc.text(), line);
}

#[rstest]
#[case("- item")]
#[case("  * [ ] task")]
#[case("12. twelve")]
#[case("### deep")]
#[case(">  quoted")]
#[case("[^10]: source")]
fn marks_never_precede_the_prefix(#[case] line: &str) {
    let prefix_len = PrefixMatcher::prefix_len(line);
    let mut doc = MarkdownBuffer::new(line);
    normalize(&mut doc, Direction::Rtl);

    let text = doc.text();
    assert_eq!(&text[..prefix_len], &line[..prefix_len]);
    assert!(text[prefix_len..].starts_with('\u{200F}'));

    normalize(&mut doc, Direction::Ltr);
    assert_eq!(doc.text(), line);
}

#[test]
fn mixed_document_snapshot() {
    let source = "# Notes\n\n- first item\n- פריט שני\n1. numbered\n> quote\n\nplain paragraph";
    let mut doc = MarkdownBuffer::new(source);
    let all = whole_document(&doc);
    doc.set_selections(&[all]);

    normalize(&mut doc, Direction::Rtl);

    insta::assert_snapshot!(reveal_marks(&doc.text()), @r"
    # <RLM>Notes
    <RLM>
    - <RLM>first item
    - פריט שני
    1. <RLM>numbered
    > <RLM>quote
    <RLM>
    <RLM>plain paragraph
    ");

    normalize(&mut doc, Direction::Ltr);
    insta::assert_snapshot!(reveal_marks(&doc.text()), @r"
    # Notes

    - first item
    - <LRM>פריט שני
    1. numbered
    > quote

    plain paragraph
    ");
}

#[test]
fn table_is_governed_by_first_header_cell() {
    let source = "intro\n\n| Name | Age |\n|---|---|\n| Bob | 4 |\n| Ann | 5 |";
    let mut doc = MarkdownBuffer::new(source)
        .with_selections(&[Selection::caret(Position::new(5, 3))]);

    normalize(&mut doc, Direction::Rtl);

    insta::assert_snapshot!(reveal_marks(&doc.text()), @r"
    intro

    | <RLM>Name | Age |
    |---|---|
    | Bob | 4 |
    | Ann | 5 |
    ");
    for line in 2..6 {
        assert_eq!(line_direction(&doc, line), Direction::Rtl);
    }
    assert_eq!(line_direction(&doc, 0), Direction::Ltr);

    normalize(&mut doc, Direction::Ltr);
    assert_eq!(doc.text(), source);
}

#[test]
fn hebrew_table_header_gets_lrm() {
    let source = "| שם | גיל |\n|:-:|:-:|\n| דן | 4 |";
    let mut doc = MarkdownBuffer::new(source)
        .with_selections(&[Selection::caret(Position::new(1, 0))]);

    normalize(&mut doc, Direction::Ltr);

    assert_eq!(doc.line(0), "| \u{200E}שם | גיל |");
    assert_eq!(line_direction(&doc, 2), Direction::Ltr);
}
