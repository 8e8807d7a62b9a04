use criterion::{criterion_group, criterion_main, Criterion};

use htmlshot::{normalize_fragment, Converter, RenderConfig, StubEngine};

// Benchmarks cover the marshalling paths only; the stub engine renders
// nothing, so the numbers exclude actual rendering work.

fn bench_normalize_fragment(c: &mut Criterion) {
    let fragment = "<p>Hello, this is me.</p><p>Please be kind to me.</p>";

    c.bench_function("normalize_fragment", |b| {
        b.iter(|| normalize_fragment(fragment).unwrap())
    });
}

fn bench_normalize_rejects_plain_text(c: &mut Criterion) {
    let text = "just some plain text with no markup in it at all";

    c.bench_function("normalize_plain_text", |b| {
        b.iter(|| normalize_fragment(text).unwrap_err())
    });
}

fn bench_marshal_and_convert(c: &mut Criterion) {
    let config = RenderConfig {
        transparent: true,
        format: "png".to_string(),
        screen_width: 1024,
        quality: 90,
        zoom_factor: 1.5,
        ..Default::default()
    };

    c.bench_function("marshal_and_convert", |b| {
        b.iter(|| {
            let converter = Converter::with_engine(config.clone(), StubEngine::new())
                .expect("failed to create converter");
            let mut sink = Vec::new();
            converter
                .run("<html><body>bench</body></html>", &mut sink)
                .expect("conversion failed");
            sink
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_fragment,
    bench_normalize_rejects_plain_text,
    bench_marshal_and_convert
);
criterion_main!(benches);
