//! Extraction benchmarks.

use compkit_extract::{extract, sanitize};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIMPLE_REPLY: &str = r#"
const Button = ({ children }) => {
  return <button className="rounded-md px-4 py-2">{children}</button>;
};

export default Button;
"#;

const DIALOG: &str = include_str!("../tests/fixtures/dialog.tsx");
const MULTI_REPLY: &str = include_str!("../tests/fixtures/multi_reply.txt");

fn extract_simple(c: &mut Criterion) {
    c.bench_function("extract_simple", |b| b.iter(|| extract(black_box(SIMPLE_REPLY))));
}

fn extract_dialog(c: &mut Criterion) {
    c.bench_function("extract_dialog", |b| b.iter(|| extract(black_box(DIALOG))));
}

fn sanitize_reply(c: &mut Criterion) {
    c.bench_function("sanitize_reply", |b| b.iter(|| sanitize(black_box(MULTI_REPLY))));
}

criterion_group!(benches, extract_simple, extract_dialog, sanitize_reply);
criterion_main!(benches);
