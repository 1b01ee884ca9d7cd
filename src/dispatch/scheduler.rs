use crate::dispatch::cursor::DispatchCursor;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::NoiseResult;

/// Per-run dispatch statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames whose job returned `Ok`.
    pub frames_written: u64,
    /// Frames whose job failed; reported and skipped.
    pub frames_skipped: u64,
}

impl DispatchStats {
    fn merge(&mut self, other: DispatchStats) {
        self.frames_total += other.frames_total;
        self.frames_written += other.frames_written;
        self.frames_skipped += other.frames_skipped;
    }
}

/// One less than the available parallelism, and never less than one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Clamp a requested worker count to `[1, frames]`; `None` picks [`default_worker_count`].
pub fn resolve_worker_count(requested: Option<usize>, frames: u64) -> usize {
    let cap = usize::try_from(frames).unwrap_or(usize::MAX).max(1);
    requested
        .unwrap_or_else(default_worker_count)
        .clamp(1, cap)
}

/// Fixed pool of worker threads pulling frame indices from a shared [`DispatchCursor`].
///
/// Workers never talk to each other: each one loops "claim index, run job, claim index" until the
/// cursor is drained, then exits. Completion order across workers is unspecified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameScheduler {
    workers: usize,
}

impl FrameScheduler {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job(worker_id, frame)` exactly once for every frame in `range`.
    ///
    /// A failing job is logged and counted in [`DispatchStats::frames_skipped`]; the remaining
    /// frames still run. A panicking job propagates the panic once all workers have stopped.
    pub fn run<F>(&self, range: FrameRange, job: F) -> DispatchStats
    where
        F: Fn(usize, FrameIndex) -> NoiseResult<()> + Sync,
    {
        let workers = resolve_worker_count(Some(self.workers), range.len_frames());
        if range.is_empty() {
            return DispatchStats::default();
        }

        let cursor = DispatchCursor::new(range);
        tracing::debug!(
            workers,
            start = range.start.0,
            end = range.end.0,
            "dispatching frames"
        );

        let per_worker: Vec<std::thread::Result<DispatchStats>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let cursor = &cursor;
                    let job = &job;
                    scope.spawn(move || worker_loop(worker, cursor, job))
                })
                .collect();
            handles.into_iter().map(|h| h.join()).collect()
        });

        let mut stats = DispatchStats::default();
        for res in per_worker {
            match res {
                Ok(s) => stats.merge(s),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        stats
    }
}

fn worker_loop<F>(worker: usize, cursor: &DispatchCursor, job: &F) -> DispatchStats
where
    F: Fn(usize, FrameIndex) -> NoiseResult<()> + Sync,
{
    let mut stats = DispatchStats::default();
    while let Some(frame) = cursor.next_index() {
        stats.frames_total += 1;
        match job(worker, frame) {
            Ok(()) => stats.frames_written += 1,
            Err(e) => {
                stats.frames_skipped += 1;
                tracing::warn!(worker, frame = frame.0, error = %e, "skipping frame");
            }
        }
    }
    tracing::debug!(worker, frames = stats.frames_total, "worker drained");
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/scheduler.rs"]
mod tests;
