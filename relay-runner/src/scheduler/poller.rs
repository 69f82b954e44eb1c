//! Task poller
//!
//! Polls the scheduling API for pending tasks and feeds them into the task
//! channel. Fetch-side failures back off linearly, one extra second per
//! consecutive error up to a minute; any decoded envelope resets the
//! backoff.

use std::sync::Arc;
use std::time::Duration;

use relay_client::{ClientError, SchedulerApi};
use relay_core::domain::task::Task;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error};

use crate::config::SchedulerConfig;

/// Ceiling for the linear backoff, in seconds
const BACKOFF_CEILING_SECS: u64 = 60;

/// Linear backoff for consecutive fetch errors
///
/// Each recorded error adds one second of delay, up to the ceiling. The
/// delay is slept before the attempt that follows the error, so after N
/// consecutive errors the next fetch waits N seconds.
#[derive(Debug)]
struct Backoff {
    errors: u64,
    ceiling: u64,
}

impl Backoff {
    fn new(ceiling: u64) -> Self {
        Self { errors: 0, ceiling }
    }

    /// Delay to sleep before the next fetch attempt
    fn delay(&self) -> Duration {
        Duration::from_secs(self.errors)
    }

    fn record_error(&mut self) {
        if self.errors < self.ceiling {
            self.errors += 1;
        }
    }

    fn reset(&mut self) {
        self.errors = 0;
    }
}

/// Poller that continuously fetches tasks and enqueues them
pub struct Poller {
    config: SchedulerConfig,
    client: Arc<dyn SchedulerApi>,
    queue: mpsc::Sender<Task>,
}

impl Poller {
    /// Creates a new poller feeding the given channel
    pub fn new(
        config: SchedulerConfig,
        client: Arc<dyn SchedulerApi>,
        queue: mpsc::Sender<Task>,
    ) -> Self {
        Self {
            config,
            client,
            queue,
        }
    }

    /// Runs the polling loop
    ///
    /// Returns only if every worker is gone and the channel closed.
    pub async fn run(self) {
        let mut backoff = Backoff::new(BACKOFF_CEILING_SECS);

        loop {
            time::sleep(backoff.delay()).await;

            debug!("get info from {}/shedule/get", self.config.api_url);

            match self.client.fetch_next().await {
                Ok(Some(task)) => {
                    backoff.reset();
                    debug!(task_id = task.id, "checker received new task");
                    // Blocks while all workers are busy; bounded in-flight
                    // tasks are the designed backpressure.
                    if self.queue.send(task).await.is_err() {
                        error!("task channel closed, checker stopping");
                        return;
                    }
                }
                Ok(None) => {
                    backoff.reset();
                    time::sleep(self.config.poll_interval()).await;
                }
                Err(ClientError::Api { code, message }) => {
                    backoff.reset();
                    if message.is_empty() {
                        error!("checker: unknown code from api: {code}");
                    } else {
                        error!("checker: {code} - {message}");
                    }
                    time::sleep(self.config.poll_interval()).await;
                }
                Err(err) if err.is_transient() => {
                    error!(
                        "checker: error get task from {} - {err}",
                        self.config.api_url
                    );
                    backoff.record_error();
                }
                Err(err) => {
                    // Envelope round-trip succeeded but the task payload
                    // did not decode; the task is discarded.
                    backoff.reset();
                    error!("checker: {err}");
                    time::sleep(self.config.poll_interval()).await;
                }
            }
        }
    }
}
