use criterion::{criterion_group, criterion_main, Criterion};
use icu_normalizer::ComposingNormalizer;
use icu_normalizer::DecomposingNormalizer;

pub const WARM_UP_TIME: u64 = 3;
pub const MEASUREMENT_TIME: u64 = 7;

/// NFC / NFD по таблицам nf.bin в сравнении с ICU
fn nf(c: &mut Criterion)
{
    let engine = match ens_normalize_benches::engine() {
        Some(engine) => engine,
        None => return,
    };

    let icu_nfc = ComposingNormalizer::new_nfc();
    let icu_nfd = DecomposingNormalizer::new_nfd();

    let mut group = c.benchmark_group("nf");

    group.warm_up_time(core::time::Duration::from_secs(WARM_UP_TIME));
    group.measurement_time(core::time::Duration::from_secs(MEASUREMENT_TIME));

    for (name, text) in ens_normalize_benches::texts() {
        let cps: Vec<u32> = text.chars().map(u32::from).collect();

        group.bench_with_input(criterion::BenchmarkId::new("nfc", name), &cps, |b, cps| {
            b.iter(|| engine.nf().nfc(criterion::black_box(cps)))
        });
        group.bench_with_input(criterion::BenchmarkId::new("nfd", name), &cps, |b, cps| {
            b.iter(|| engine.nf().nfd(criterion::black_box(cps)))
        });
        group.bench_with_input(criterion::BenchmarkId::new("icu_nfc", name), text, |b, text| {
            b.iter(|| icu_nfc.normalize(criterion::black_box(text)))
        });
        group.bench_with_input(criterion::BenchmarkId::new("icu_nfd", name), text, |b, text| {
            b.iter(|| icu_nfd.normalize(criterion::black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(benches, nf);
criterion_main!(benches);
