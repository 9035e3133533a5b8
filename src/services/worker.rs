//! A dedicated conversion thread driven by messages.
//!
//! The worker owns one OS thread. Requests move into it over a channel and
//! each result comes back through its own oneshot, so at most one result is
//! outstanding per worker.

use pixel_art::{process_request, ProcessRequest, ProcessResponse};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use tokio::sync::{mpsc, oneshot};

use crate::error::WorkerError;

type JobResult = Result<ProcessResponse, WorkerError>;

struct Job {
    request: ProcessRequest,
    reply: oneshot::Sender<JobResult>,
}

/// Handle to a background pixel-art conversion thread.
///
/// Dropping the handle closes the job channel; the thread exits once any
/// in-flight job has finished.
pub struct PixelArtWorker {
    jobs: mpsc::UnboundedSender<Job>,
    pending: Option<oneshot::Receiver<JobResult>>,
}

impl PixelArtWorker {
    /// Start the worker thread.
    pub fn spawn() -> Result<Self, WorkerError> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name("pixel-art-worker".to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    let result = run_job(job.request);
                    if job.reply.send(result).is_err() {
                        tracing::debug!("Result discarded, request was stopped");
                    }
                }
                tracing::debug!("Worker channel closed, exiting");
            })
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        Ok(Self {
            jobs,
            pending: None,
        })
    }

    /// Hand a request to the worker.
    ///
    /// Fails with [`WorkerError::Busy`] while a previous result has not been
    /// received or stopped.
    pub fn submit(&mut self, request: ProcessRequest) -> Result<(), WorkerError> {
        if self.pending.is_some() {
            return Err(WorkerError::Busy);
        }

        let (reply, rx) = oneshot::channel();
        self.jobs
            .send(Job { request, reply })
            .map_err(|_| WorkerError::Disconnected)?;
        self.pending = Some(rx);
        Ok(())
    }

    /// Wait for the outstanding result.
    pub async fn recv(&mut self) -> Result<ProcessResponse, WorkerError> {
        let rx = self.pending.take().ok_or(WorkerError::Idle)?;
        rx.await.map_err(|_| WorkerError::Disconnected)?
    }

    /// Submit a request and wait for its result.
    pub async fn process(
        &mut self,
        request: ProcessRequest,
    ) -> Result<ProcessResponse, WorkerError> {
        self.submit(request)?;
        self.recv().await
    }

    /// Forget the outstanding result so a new request can be submitted.
    ///
    /// The running conversion is not interrupted; its output is dropped.
    pub fn stop(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("Stopped outstanding request");
        }
    }

    /// Whether a result is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

fn run_job(request: ProcessRequest) -> JobResult {
    match catch_unwind(AssertUnwindSafe(|| process_request(request))) {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(e)) => {
            tracing::warn!(%e, "Conversion failed");
            Err(WorkerError::Processing(e.to_string()))
        }
        Err(_) => {
            tracing::error!("Conversion panicked");
            Err(WorkerError::Processing("conversion panicked".to_string()))
        }
    }
}
