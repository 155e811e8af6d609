use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use paulstretch_stream::{stretch_pipe, Paulstretch, StretchConfig, StretchEngine, StretchStream};

const WINDOW: usize = 4096;

fn input_bytes(windows: usize) -> Vec<u8> {
    let samples: Vec<f32> = (0..WINDOW * windows)
        .map(|i| (i as f32 * 0.01).sin() * 0.5)
        .collect();
    bytemuck::cast_slice(&samples).to_vec()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("paulstretch");

    group.throughput(Throughput::Elements(WINDOW as u64));
    group.bench_function("engine frame", |b| {
        let config = StretchConfig::new(1.0, WINDOW).seed(1);
        let mut engine = Paulstretch::new(&config).unwrap();
        let window = vec![0.25f32; WINDOW];

        b.iter(|| {
            engine.submit(black_box(&window)).unwrap();
            black_box(engine.try_fetch().map(|frame| frame[0]));
        })
    });

    let input = input_bytes(16);
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("stream pipe x4", |b| {
        let config = StretchConfig::new(4.0, WINDOW).seed(1);
        b.iter(|| {
            let stream = StretchStream::with_config(&config).unwrap();
            let mut output = Vec::new();
            stretch_pipe(&stream, Cursor::new(&input), &mut output).unwrap();
            black_box(output.len())
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
