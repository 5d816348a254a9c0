use criterion::{Criterion, criterion_group, criterion_main};
use markdown_rtl_engine::{
    Direction, DirectionNormalizer, MarkdownBuffer, Position, Selection, TableHandling, TextBuffer,
};

fn generate_mixed_markdown(sections: usize) -> String {
    let base = "# Section\n\n- English bullet\n- פריט בעברית\n1. numbered\n> quote\n\n| Name | Age |\n|---|---|\n| Bob | 4 |\n\nplain paragraph\n\n";
    base.repeat(sections)
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.sample_size(10);

    let content = generate_mixed_markdown(200);
    let doc = MarkdownBuffer::new(&content);
    let last = doc.line_count() - 1;
    let doc = doc.with_selections(&[Selection::new(Position::new(0, 0), Position::new(last, 0))]);
    let normalizer = DirectionNormalizer::new(TableHandling::HeaderCell);

    group.bench_function("whole_document_to_rtl", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            let outcome = normalizer.normalize(&mut d, std::hint::black_box(Direction::Rtl));
            std::hint::black_box(outcome);
        });
    });

    group.bench_function("toggle_round_trip", |b| {
        b.iter(|| {
            let mut d = doc.clone();
            normalizer.normalize(&mut d, Direction::Rtl);
            let outcome = normalizer.normalize(&mut d, Direction::Ltr);
            std::hint::black_box(outcome);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
