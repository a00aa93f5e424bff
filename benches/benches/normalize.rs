use criterion::{criterion_group, criterion_main, Criterion};
use ens_normalize::Ensip15;


group!(
    normalize,
    test_normalize,
    "normalize",
    |engine: &Ensip15, name: &[u32]| engine.normalize(name).is_ok()
);

group!(
    beautify,
    test_beautify,
    "beautify",
    |engine: &Ensip15, name: &[u32]| engine.beautify(name).is_ok()
);

group!(
    fragment,
    test_fragment,
    "fragment",
    |engine: &Ensip15, name: &[u32]| engine.normalize_fragment(name, false).is_ok()
);

criterion_group!(benches, normalize, beautify, fragment);
criterion_main!(benches);
