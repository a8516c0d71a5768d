//! Bounded worker pool for hash-and-match tasks.
//!
//! The pool caps the number of simultaneously open file handles: each job
//! reads one file, so at most `workers` files are open at once, and the
//! bounded queue back-pressures the traversal thread instead of buffering
//! the whole tree.

use anyhow::{Context, Result};
use crossbeam_channel::{Sender, bounded};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size thread pool draining a bounded job queue.
pub struct WorkerPool {
    tx: Sender<Job>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `workers` threads (at least one) consuming from a queue of
    /// twice that depth.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let (tx, rx) = bounded::<Job>(workers * 2);

        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let rx = rx.clone();
            let handle = std::thread::Builder::new()
                .name(format!("hscan-worker-{i}"))
                .spawn(move || {
                    for job in rx.iter() {
                        job();
                    }
                })
                .context("failed to spawn worker thread")?;
            handles.push(handle);
        }

        Ok(Self { tx, handles })
    }

    /// Enqueues a job, blocking once the queue is full.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) {
        // send only fails when every worker is gone, which cannot happen
        // before drain() drops the sender
        let _ = self.tx.send(Box::new(job));
    }

    /// Waits until every submitted job has run to completion, then joins the
    /// workers.
    pub fn drain(self) {
        drop(self.tx);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    #[test]
    fn test_drain_waits_for_every_submitted_job() {
        let pool = WorkerPool::new(5).unwrap();
        let done = Arc::new(AtomicU64::new(0));

        for _ in 0..10_000 {
            let done = Arc::clone(&done);
            pool.submit(move || {
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.drain();

        assert_eq!(done.load(Ordering::SeqCst), 10_000);
    }

    #[test]
    fn test_pool_runs_at_most_workers_jobs_at_once() {
        let pool = WorkerPool::new(5).unwrap();
        let running = Arc::new(AtomicU64::new(0));
        let peak = Arc::new(AtomicU64::new(0));

        for _ in 0..200 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            pool.submit(move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(1));
                running.fetch_sub(1, Ordering::SeqCst);
            });
        }
        pool.drain();

        assert!(peak.load(Ordering::SeqCst) <= 5);
    }

    #[test]
    fn test_zero_workers_is_clamped_to_one() {
        let pool = WorkerPool::new(0).unwrap();
        let done = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&done);
        pool.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        pool.drain();

        assert_eq!(done.load(Ordering::SeqCst), 1);
    }
}
