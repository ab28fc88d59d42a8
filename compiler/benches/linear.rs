use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nfa_compiler::*;

fn pad_pattern_to_length_with(prefix: &str, suffix: &str, pad_str: &str, len: usize) -> String {
    let prefix_len = prefix.chars().count();
    let suffix_len = suffix.chars().count();

    if (suffix_len + prefix_len) > len {
        "".to_string()
    } else {
        let req_padding = len - suffix_len - prefix_len;

        prefix
            .chars()
            .chain(pad_str.chars().cycle().take(req_padding))
            .chain(suffix.chars())
            .collect()
    }
}

pub fn exponential_pattern_size_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern length compilation comparison");

    // each pad mixes concatenation, a quantifier and an alternation.
    let pad = "ab*|c";

    (2..10)
        .map(|exponent| 2usize.pow(exponent))
        .map(|pattern_len| {
            (
                pad_pattern_to_length_with("(", "d)", pad, pattern_len),
                pattern_len,
            )
        })
        .for_each(|(pattern, sample_size)| {
            group.throughput(Throughput::Elements(sample_size as u64));
            group.bench_with_input(
                BenchmarkId::new("pattern length of size", sample_size),
                &pattern,
                |b, pattern| {
                    b.iter(|| {
                        let res = compile(pattern);
                        assert!(res.is_ok())
                    })
                },
            );
        })
}

criterion_group!(benches, exponential_pattern_size_comparison);
criterion_main!(benches);
