use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Barrier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, trace};

use crate::edge_pipeline::common::error::{EdgeError, Result, WorkerPhase};
use crate::edge_pipeline::convolve::{FrameProcessor, check_buffers};
use crate::edge_pipeline::frame::{ColorFrame, EdgeFrame, LuminanceFrame};
use crate::edge_pipeline::tiled::partition::partition_columns;
use crate::edge_pipeline::tiled::share::{SharedPlane, WorkShare};

struct WorkerFault {
    worker: usize,
    phase: WorkerPhase,
    reason: String,
}

/// Runs grayscale and Sobel across a fixed number of workers per frame.
///
/// Workers are scoped threads spawned for each frame; the barrier is created
/// once and reused. Every frame goes through exactly one barrier and one join.
pub struct TiledScheduler {
    workers: usize,
    barrier: Barrier,
}

impl TiledScheduler {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(EdgeError::Configuration(
                "tiled scheduler needs at least one worker".to_string(),
            ));
        }

        Ok(Self {
            workers,
            barrier: Barrier::new(workers),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Builds the frame's shares and drives them through both phases.
    ///
    /// `grayscale` runs for every share, then the barrier, then `sobel`. If
    /// any share fails phase 1, phase 2 is skipped for all of them.
    pub(super) fn dispatch<G, S>(
        &self,
        color: &ColorFrame,
        luma: &mut LuminanceFrame,
        edges: &mut EdgeFrame,
        grayscale: G,
        sobel: S,
    ) -> Result<()>
    where
        G: Fn(&WorkShare<'_>) + Sync,
        S: Fn(&WorkShare<'_>) + Sync,
    {
        let (luma_width, luma_height) = (luma.width(), luma.height());
        let (edge_width, edge_height) = (edges.width(), edges.height());
        let luma_plane = SharedPlane::new(luma.as_mut_slice(), luma_width, luma_height);
        let edge_plane = SharedPlane::new(edges.as_mut_slice(), edge_width, edge_height);

        let shares: Vec<WorkShare<'_>> = partition_columns(luma_width, self.workers)
            .into_iter()
            .zip(partition_columns(edge_width, self.workers))
            .enumerate()
            .map(|(worker, (luma_cols, edge_cols))| {
                WorkShare::new(worker, luma_cols, edge_cols, color, luma_plane, edge_plane)
            })
            .collect();

        let failed = AtomicBool::new(false);
        let in_sobel: Vec<AtomicBool> = shares.iter().map(|_| AtomicBool::new(false)).collect();
        let outcomes: Vec<std::result::Result<(), WorkerFault>> = thread::scope(|scope| {
            let handles: Vec<_> = shares
                .iter()
                .zip(&in_sobel)
                .map(|(share, in_sobel)| {
                    let (grayscale, sobel, failed) = (&grayscale, &sobel, &failed);
                    scope.spawn(move || self.work(share, grayscale, sobel, failed, in_sobel))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    // A panic that escaped both phase guards; blame the phase
                    // the worker last entered.
                    handle.join().unwrap_or_else(|payload| {
                        let phase = if in_sobel[worker].load(Ordering::Relaxed) {
                            WorkerPhase::Sobel
                        } else {
                            WorkerPhase::Grayscale
                        };
                        Err(WorkerFault {
                            worker,
                            phase,
                            reason: panic_reason(payload.as_ref()),
                        })
                    })
                })
                .collect()
        });

        match outcomes.into_iter().find_map(|outcome| outcome.err()) {
            Some(fault) => Err(EdgeError::WorkerFailure {
                worker: fault.worker,
                phase: fault.phase,
                reason: fault.reason,
            }),
            None => Ok(()),
        }
    }

    fn work<G, S>(
        &self,
        share: &WorkShare<'_>,
        grayscale: &G,
        sobel: &S,
        failed: &AtomicBool,
        in_sobel: &AtomicBool,
    ) -> std::result::Result<(), WorkerFault>
    where
        G: Fn(&WorkShare<'_>),
        S: Fn(&WorkShare<'_>),
    {
        let worker = share.worker();
        trace!(
            worker,
            luma_columns = ?share.luma_columns(),
            edge_columns = ?share.edge_columns(),
            "worker started"
        );

        let first = panic::catch_unwind(AssertUnwindSafe(|| grayscale(share)));
        if first.is_err() {
            failed.store(true, Ordering::Relaxed);
        }

        // Every worker arrives here, failed or not, so nobody is left waiting.
        self.barrier.wait();

        if let Err(payload) = first {
            return Err(WorkerFault {
                worker,
                phase: WorkerPhase::Grayscale,
                reason: panic_reason(payload.as_ref()),
            });
        }
        if failed.load(Ordering::Relaxed) {
            trace!(worker, "skipping sobel after peer failure");
            return Ok(());
        }

        in_sobel.store(true, Ordering::Relaxed);
        panic::catch_unwind(AssertUnwindSafe(|| sobel(share))).map_err(|payload| WorkerFault {
            worker,
            phase: WorkerPhase::Sobel,
            reason: panic_reason(payload.as_ref()),
        })
    }
}

impl FrameProcessor for TiledScheduler {
    fn process(
        &mut self,
        color: &ColorFrame,
        luma: &mut LuminanceFrame,
        edges: &mut EdgeFrame,
    ) -> Result<()> {
        check_buffers(color, luma, edges)?;
        debug!(geometry = %color.geometry(), workers = self.workers, "tiled frame");

        self.dispatch(
            color,
            luma,
            edges,
            |share| share.grayscale(),
            |share| share.sobel(),
        )
    }

    fn name(&self) -> &'static str {
        "tiled"
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
