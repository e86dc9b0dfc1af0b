//! Fixed-size worker pool fed from a bounded shared queue.
//!
//! N persistent tokio tasks pull items from an `async-channel` queue whose
//! capacity equals the worker count, so at most `2 * N` items are ever
//! buffered or in flight. Each worker finishes an item before taking the next.
//! Results arrive on an unbounded channel in completion order.
//!
//! `async-channel`'s `Receiver` is `Clone`, so every worker owns a handle and
//! no `Mutex` around a shared receiver is needed.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pool of worker tasks processing a fixed batch of items.
///
/// ```ignore
/// let mut pool = WorkerPool::start(20, rows, move |row| {
///     let enricher = enricher.clone();
///     async move { enricher.enrich(&row).await }
/// });
/// while let Some(result) = pool.recv().await {
///     handle(result);
/// }
/// ```
pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    workers: usize,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `n` workers (at least one), queue every item, and return the pool.
    ///
    /// Submission runs in its own task so the caller can start receiving
    /// immediately. There is no per-item timeout here; callers that want a
    /// deadline wrap their own future.
    pub fn start<W, F, Fut>(n: usize, items: Vec<W>, process_fn: F) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let n = n.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(n);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let process_fn = Arc::new(process_fn);

        let handles: Vec<JoinHandle<()>> = (0..n)
            .map(|worker| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                tokio::spawn(async move {
                    let mut processed = 0usize;
                    while let Ok(item) = work_rx.recv().await {
                        let r = process_fn(item).await;
                        processed += 1;
                        if result_tx.send(r).is_err() {
                            log::debug!("worker {}: result receiver dropped, stopping", worker);
                            break;
                        }
                    }
                    log::debug!("worker {}: queue drained after {} items", worker, processed);
                })
            })
            .collect();

        // The pool's result channel closes once every worker has exited.
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Self {
            result_rx,
            workers: n,
            _handles: handles,
        }
    }

    /// Number of worker tasks in the pool.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Next result, or `None` once all items are processed and workers have exited.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }
}
