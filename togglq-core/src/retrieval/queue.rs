//! Serialized execution of remote requests.
//!
//! A [`RequestQueue`] runs the producers handed to it one at a time, in the
//! order they were enqueued. Each caller gets a [`Deferred`] that resolves
//! to its own producer's result.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::error::{Error, Result};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// FIFO queue that executes one request at a time.
///
/// Construct it inside a Tokio runtime; the worker task is spawned
/// immediately and lives until the queue is dropped and drained.
pub struct RequestQueue {
    jobs: mpsc::UnboundedSender<Job>,
    pending: Arc<AtomicUsize>,
}

impl RequestQueue {
    /// Queue without spacing between requests.
    pub fn new() -> Self {
        Self::with_spacing(Duration::ZERO)
    }

    /// Queue that waits at least `spacing` after a request settles before
    /// starting the next one.
    pub fn with_spacing(spacing: Duration) -> Self {
        let (jobs, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        tokio::spawn(run(receiver, spacing, Arc::clone(&pending)));
        Self { jobs, pending }
    }

    /// Add a producer to the end of the queue.
    ///
    /// The producer is not called until every earlier item has settled. A
    /// failing or panicking producer only affects its own result.
    pub fn enqueue<T, F, Fut>(&self, producer: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let result = producer().await;
            // The caller may have dropped its Deferred.
            let _ = sender.send(result);
        });

        let queued = self.pending.fetch_add(1, Ordering::SeqCst);
        if queued > 0 {
            tracing::debug!(ahead = queued, "Queueing report request");
        }
        if self.jobs.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }

        Deferred { receiver }
    }

    /// Items queued or in flight.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

async fn run(mut jobs: mpsc::UnboundedReceiver<Job>, spacing: Duration, pending: Arc<AtomicUsize>) {
    let mut last_settled: Option<Instant> = None;

    while let Some(job) = jobs.recv().await {
        if let Some(settled) = last_settled {
            let wait = spacing.saturating_sub(settled.elapsed());
            if !wait.is_zero() {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Spacing report request");
                tokio::time::sleep(wait).await;
            }
        }

        // Run on its own task so a panicking producer cannot take the worker down.
        if let Err(e) = tokio::spawn(job).await {
            tracing::warn!(error = %e, "Queued request did not complete");
        }

        pending.fetch_sub(1, Ordering::SeqCst);
        last_settled = Some(Instant::now());
    }
}

/// The eventual result of an enqueued producer.
pub struct Deferred<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T> Future for Deferred<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| match received {
            Ok(result) => result,
            Err(_) => Err(Error::Queue(
                "request was dropped before producing a result".to_string(),
            )),
        })
    }
}
