//! Write throughput across destinations and buffer sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use saife_core::{
    stream::{BufferedOutputStream, FileOutputStream, MemoryOutputStream, OutputStream},
    StreamConfig,
};

const PAYLOAD: usize = 64 * 1024;

fn bench_single_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_byte");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));

    group.bench_function("memory", |b| {
        b.iter(|| {
            let mut stream = MemoryOutputStream::with_capacity(PAYLOAD);
            for i in 0..PAYLOAD {
                stream.write_byte(black_box(i as u8)).unwrap();
            }
            stream.close().unwrap();
        })
    });

    group.bench_function("buffered_vec", |b| {
        b.iter(|| {
            let mut stream = BufferedOutputStream::new(Vec::with_capacity(PAYLOAD));
            for i in 0..PAYLOAD {
                stream.write_byte(black_box(i as u8)).unwrap();
            }
            stream.close().unwrap();
        })
    });

    group.finish();
}

fn bench_file_chunks(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.bin");
    let data = vec![0xA5u8; PAYLOAD];

    let mut group = c.benchmark_group("file_write_all");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));

    for capacity in [512usize, 4096, 65536] {
        let config = StreamConfig::new().buffer_capacity(capacity);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &config, |b, config| {
            b.iter(|| {
                let mut stream = FileOutputStream::open(&path, config).unwrap();
                for chunk in data.chunks(256) {
                    stream.write_all(black_box(chunk)).unwrap();
                }
                stream.close().unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_bytes, bench_file_chunks);
criterion_main!(benches);
