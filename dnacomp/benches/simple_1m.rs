use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dnacomp::_internal_test_data::SEQ_1M;
use dnacomp::codec::{DnaCompressor, DnaDecompressor};

fn compress_1m(c: &mut Criterion) {
    c.bench_function("Compress 1M acids", |b| {
        b.iter_batched_ref(
            DnaCompressor::new,
            |compressor| {
                let data = compressor.compress_sequence(&SEQ_1M).unwrap();
                assert!(!data.is_empty());
            },
            BatchSize::LargeInput,
        )
    });
}

fn decompress_1m(c: &mut Criterion) {
    let data = DnaCompressor::new().compress_sequence(&SEQ_1M).unwrap();

    c.bench_function("Decompress 1M acids", |b| {
        b.iter_batched_ref(
            DnaDecompressor::new,
            |decompressor| {
                let sequence = decompressor.decompress_bytes(&data).unwrap();
                assert_eq!(sequence.len(), SEQ_1M.len());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, compress_1m, decompress_1m);
criterion_main!(benches);
