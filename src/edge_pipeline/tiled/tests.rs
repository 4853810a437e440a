use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::edge_pipeline::common::error::{EdgeError, WorkerPhase};
use crate::edge_pipeline::convolve::{FrameConvolver, FrameProcessor};
use crate::edge_pipeline::frame::{ColorFrame, EdgeFrame, FrameGeometry, LuminanceFrame};
use crate::edge_pipeline::tiled::TiledScheduler;

fn noise_frame(width: usize, height: usize, seed: u32) -> ColorFrame {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let data = (0..width * height * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    ColorFrame::from_rgb(width, height, data).unwrap()
}

fn buffers(geometry: FrameGeometry) -> (LuminanceFrame, EdgeFrame) {
    (LuminanceFrame::new(geometry), EdgeFrame::for_source(geometry))
}

fn sequential(color: &ColorFrame) -> (LuminanceFrame, EdgeFrame) {
    let (mut luma, mut edges) = buffers(color.geometry());
    FrameConvolver::new()
        .process(color, &mut luma, &mut edges)
        .unwrap();
    (luma, edges)
}

#[test]
fn parallel_output_matches_sequential() {
    let sizes = [(3, 3), (5, 5), (4, 20), (8, 6), (13, 7), (64, 9)];
    for workers in [1, 2, 3, 4, 7] {
        let mut scheduler = TiledScheduler::new(workers).unwrap();
        for (i, &(w, h)) in sizes.iter().enumerate() {
            let color = noise_frame(w, h, i as u32 + 1);
            let (expected_luma, expected_edges) = sequential(&color);

            let (mut luma, mut edges) = buffers(color.geometry());
            scheduler.process(&color, &mut luma, &mut edges).unwrap();

            assert_eq!(luma, expected_luma, "luma {w}x{h} with {workers} workers");
            assert_eq!(edges, expected_edges, "edges {w}x{h} with {workers} workers");
        }
    }
}

#[test]
fn scheduler_is_reused_across_a_stream() {
    let mut scheduler = TiledScheduler::new(3).unwrap();
    let geometry = FrameGeometry::new(17, 11);
    let (mut luma, mut edges) = buffers(geometry);

    for seed in 0..20 {
        let color = noise_frame(17, 11, seed);
        scheduler.process(&color, &mut luma, &mut edges).unwrap();
        assert_eq!(edges, sequential(&color).1, "frame {seed}");
    }
}

#[test]
fn slow_grayscale_worker_is_waited_for() {
    let scheduler = TiledScheduler::new(4).unwrap();
    let color = noise_frame(21, 8, 7);
    let (mut luma, mut edges) = buffers(color.geometry());

    scheduler
        .dispatch(
            &color,
            &mut luma,
            &mut edges,
            |share| {
                if share.worker() == 2 {
                    std::thread::sleep(Duration::from_millis(30));
                }
                share.grayscale();
            },
            |share| share.sobel(),
        )
        .unwrap();

    assert_eq!(edges, sequential(&color).1);
}

#[test]
fn grayscale_failure_skips_sobel_and_fails_the_frame() {
    let scheduler = TiledScheduler::new(4).unwrap();
    let color = noise_frame(12, 6, 3);
    let (mut luma, mut edges) = buffers(color.geometry());
    let sobel_calls = AtomicUsize::new(0);

    let err = scheduler
        .dispatch(
            &color,
            &mut luma,
            &mut edges,
            |share| {
                if share.worker() == 1 {
                    panic!("lost a tile");
                }
                share.grayscale();
            },
            |share| {
                sobel_calls.fetch_add(1, Ordering::Relaxed);
                share.sobel();
            },
        )
        .unwrap_err();

    match err {
        EdgeError::WorkerFailure {
            worker,
            phase,
            reason,
        } => {
            assert_eq!(worker, 1);
            assert_eq!(phase, WorkerPhase::Grayscale);
            assert_eq!(reason, "lost a tile");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sobel_calls.load(Ordering::Relaxed), 0);
    assert!(edges.as_slice().iter().all(|&v| v == 0));
}

#[test]
fn sobel_failure_is_reported_with_its_phase() {
    let scheduler = TiledScheduler::new(3).unwrap();
    let color = noise_frame(9, 5, 11);
    let (mut luma, mut edges) = buffers(color.geometry());

    let err = scheduler
        .dispatch(
            &color,
            &mut luma,
            &mut edges,
            |share| share.grayscale(),
            |share| {
                if share.worker() == 2 {
                    panic!("worker {} gave up", share.worker());
                }
                share.sobel();
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        EdgeError::WorkerFailure {
            worker: 2,
            phase: WorkerPhase::Sobel,
            ..
        }
    ));
}

/// Panic payload that panics again when dropped, outside the phase guard.
struct ExplodingPayload;

impl Drop for ExplodingPayload {
    fn drop(&mut self) {
        panic!("payload dropped");
    }
}

#[test]
fn escaped_grayscale_panic_keeps_its_phase() {
    let scheduler = TiledScheduler::new(2).unwrap();
    let color = noise_frame(8, 4, 17);
    let (mut luma, mut edges) = buffers(color.geometry());

    let err = scheduler
        .dispatch(
            &color,
            &mut luma,
            &mut edges,
            |share| {
                if share.worker() == 0 {
                    std::panic::panic_any(ExplodingPayload);
                }
                share.grayscale();
            },
            |share| share.sobel(),
        )
        .unwrap_err();

    match err {
        EdgeError::WorkerFailure {
            worker,
            phase,
            reason,
        } => {
            assert_eq!(worker, 0);
            assert_eq!(phase, WorkerPhase::Grayscale);
            assert_eq!(reason, "payload dropped");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn scheduler_recovers_after_a_failed_frame() {
    let mut scheduler = TiledScheduler::new(2).unwrap();
    let color = noise_frame(10, 10, 5);
    let (mut luma, mut edges) = buffers(color.geometry());

    let _ = scheduler.dispatch(
        &color,
        &mut luma,
        &mut edges,
        |_| panic!("boom"),
        |share| share.sobel(),
    );

    scheduler.process(&color, &mut luma, &mut edges).unwrap();
    assert_eq!(edges, sequential(&color).1);
}

#[test]
fn zero_workers_is_a_configuration_error() {
    assert!(matches!(
        TiledScheduler::new(0),
        Err(EdgeError::Configuration(_))
    ));
}

#[test]
fn frames_without_interior_are_rejected_before_dispatch() {
    let mut scheduler = TiledScheduler::new(2).unwrap();
    let color = ColorFrame::from_rgb(5, 2, vec![0; 30]).unwrap();
    let (mut luma, mut edges) = buffers(color.geometry());
    assert!(matches!(
        scheduler.process(&color, &mut luma, &mut edges),
        Err(EdgeError::InvalidDimensions(5, 2))
    ));
}
