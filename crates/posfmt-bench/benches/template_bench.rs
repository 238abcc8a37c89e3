//! Template scanning throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use posfmt_core::{FormatValue, append_format, format};

fn bench_templates(c: &mut Criterion) {
    c.bench_function("template/literal_only", |b| {
        let template = "a fairly long literal template without any placeholders at all";
        b.iter(|| format(black_box(template), ()).unwrap());
    });

    c.bench_function("template/tuple_mixed", |b| {
        let template = "user={0} id={1} score={2} ok={3}";
        b.iter(|| format(black_box(template), ("alice", 42u64, -17i32, true)).unwrap());
    });

    c.bench_function("template/std_format_mixed", |b| {
        b.iter(|| {
            std::format!(
                "user={} id={} score={} ok={}",
                black_box("alice"),
                black_box(42u64),
                black_box(-17i32),
                black_box(true)
            )
        });
    });

    c.bench_function("template/dyn_slice_reuse_buffer", |b| {
        let values: [&dyn FormatValue; 3] = [&1u8, &"mid", &u64::MAX];
        let mut out = String::with_capacity(64);
        b.iter(|| {
            out.clear();
            append_format(&mut out, black_box("{2}-{1}-{0}"), values.as_slice()).unwrap();
            black_box(out.len())
        });
    });
}

criterion_group!(benches, bench_templates);
criterion_main!(benches);
