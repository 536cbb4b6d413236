use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tersa_core::{LexiconTranslator, Pipeline, SourceText, Summarizer, extract_text};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_summarize(c: &mut Criterion) {
    let small = fixture("article.txt");
    let large = small.repeat(50);
    let summarizer = Summarizer::new();

    let mut group = c.benchmark_group("summarize");

    group.bench_with_input(BenchmarkId::new("small", "8 sentences"), &small, |b, text| {
        b.iter(|| summarizer.summarize(black_box(text)))
    });

    group.bench_with_input(BenchmarkId::new("large", "400 sentences"), &large, |b, text| {
        b.iter(|| summarizer.summarize(black_box(text)))
    });

    group.finish();
}

fn bench_translate(c: &mut Criterion) {
    let summary = Summarizer::new().summarize(&fixture("article.txt"));
    let translator = LexiconTranslator::new();

    c.bench_function("translate_multi_sentence", |b| {
        b.iter(|| translator.translate_multi_sentence(black_box(&summary)))
    });
}

fn bench_extract(c: &mut Criterion) {
    let html = fixture("article.html");

    c.bench_function("extract_text", |b| b.iter(|| extract_text(black_box(&html))));
}

fn bench_full_pipeline(c: &mut Criterion) {
    let text = fixture("article.txt");
    let pipeline = Pipeline::new();

    c.bench_function("full_pipeline", |b| {
        b.iter(|| pipeline.process(black_box(SourceText::new(text.clone()))))
    });
}

criterion_group!(benches, bench_summarize, bench_translate, bench_extract, bench_full_pipeline);
criterion_main!(benches);
