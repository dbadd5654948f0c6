use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pybench_baseline::{parse, tokenize};

const TOKEN_STREAM: &str = r#"def Za_Pobedy 42.24 == "Hello" while x <= 23122 foo % 0.3232 "#;

const FUNCTION: &str = r#"def foo_0 (x: int, y: float, bar: str) -> int:

    a: int = 4
    b: int = 10000
    temp: int = 0
    if a > b:  # pick the smaller bound
        temp = b
    else:
        temp = a
    i: int = 1
    gcd: int = 0
    while i < temp + 1:
        if a == i:
            gcd = i

"#;

fn baseline_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("baseline");

    for repeat in [1usize, 10, 100] {
        let stream = TOKEN_STREAM.repeat(repeat);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", repeat), &stream, |b, src| {
            b.iter(|| {
                let _ = black_box(tokenize(black_box(src)));
            });
        });

        let program = FUNCTION.repeat(repeat);
        group.throughput(Throughput::Bytes(program.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", repeat), &program, |b, src| {
            b.iter(|| {
                let _ = black_box(parse(black_box(src)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, baseline_benchmarks);
criterion_main!(benches);
