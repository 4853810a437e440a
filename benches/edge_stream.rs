use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sobel_stream_rs::edge_pipeline::{
    ColorFrame, EdgeFrame, FrameConvolver, FrameProcessor, LuminanceFrame, TiledScheduler,
};

fn generate_mock_frame(width: usize, height: usize) -> ColorFrame {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x + y) % 256) as u8;
            data.extend_from_slice(&[value, value.wrapping_mul(3), 255 - value]);
        }
    }
    ColorFrame::from_rgb(width, height, data).unwrap()
}

fn run_frames(processor: &mut dyn FrameProcessor, frame: &ColorFrame, c: &mut Criterion, group: &str) {
    let mut luma = LuminanceFrame::new(frame.geometry());
    let mut edges = EdgeFrame::for_source(frame.geometry());
    c.bench_function(group, |b| {
        b.iter(|| {
            processor
                .process(black_box(frame), &mut luma, &mut edges)
                .unwrap();
        });
    });
}

fn benchmark_frame_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (640, 480, "640x480"),
        (1280, 720, "1280x720"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_mock_frame(width, height);
        let mut luma = LuminanceFrame::new(frame.geometry());
        let mut edges = EdgeFrame::for_source(frame.geometry());

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            let mut convolver = FrameConvolver::new();
            b.iter(|| {
                convolver
                    .process(black_box(frame), &mut luma, &mut edges)
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiled_workers_1280x720");
    let frame = generate_mock_frame(1280, 720);
    let mut luma = LuminanceFrame::new(frame.geometry());
    let mut edges = EdgeFrame::for_source(frame.geometry());

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &frame, |b, frame| {
            let mut scheduler = TiledScheduler::new(workers).unwrap();
            b.iter(|| {
                scheduler
                    .process(black_box(frame), &mut luma, &mut edges)
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_sequential_vs_tiled(c: &mut Criterion) {
    let frame = generate_mock_frame(1920, 1080);
    run_frames(&mut FrameConvolver::new(), &frame, c, "1080p_sequential");
    run_frames(
        &mut TiledScheduler::new(4).unwrap(),
        &frame,
        c,
        "1080p_tiled_4",
    );
}

criterion_group!(
    benches,
    benchmark_frame_sizes,
    benchmark_worker_counts,
    benchmark_sequential_vs_tiled
);
criterion_main!(benches);
