//! Task worker
//!
//! Each worker drains the task channel, executes one task at a time against
//! the API, and reports the outcome. Reporting retries until the API accepts
//! it, with no backoff and no limit: an outcome is never dropped, even at
//! the cost of hammering an unreachable API.

use std::sync::Arc;

use relay_client::SchedulerApi;
use relay_core::domain::task::{Task, TaskOutcome};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Mutex, mpsc};
use tokio::time;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;

/// A single worker of the pool
pub struct Worker {
    index: usize,
    config: SchedulerConfig,
    client: Arc<dyn SchedulerApi>,
    queue: Arc<Mutex<mpsc::Receiver<Task>>>,
}

impl Worker {
    /// Creates a new worker reading from the shared channel
    pub fn new(
        index: usize,
        config: SchedulerConfig,
        client: Arc<dyn SchedulerApi>,
        queue: Arc<Mutex<mpsc::Receiver<Task>>>,
    ) -> Self {
        Self {
            index,
            config,
            client,
            queue,
        }
    }

    /// Runs the worker loop
    ///
    /// Returns only when the channel is closed and drained.
    pub async fn run(self) {
        loop {
            // Lock held just for the receive attempt, never while a task
            // executes.
            let next = self.queue.lock().await.try_recv();

            match next {
                Ok(task) => self.process(task).await,
                Err(TryRecvError::Empty) => time::sleep(self.config.poll_interval()).await,
                Err(TryRecvError::Disconnected) => {
                    info!(worker = self.index, "task channel closed, worker stopping");
                    return;
                }
            }
        }
    }

    /// Executes one task and reports its outcome until the report sticks
    async fn process(&self, task: Task) {
        info!(
            worker = self.index,
            task_id = task.id,
            "received new task, method: {}",
            task.method
        );

        let outcome = match self.client.run_method(&task).await {
            Ok(outcome) => {
                if outcome.code != 0 {
                    warn!(
                        worker = self.index,
                        task_id = task.id,
                        "task returned code {} with message {}",
                        outcome.code,
                        outcome.response
                    );
                }
                outcome
            }
            Err(err) => {
                error!(
                    worker = self.index,
                    task_id = task.id,
                    "executor returned err: {err}"
                );
                TaskOutcome {
                    code: err.outcome_code(),
                    response: err.to_string(),
                }
            }
        };

        loop {
            match self
                .client
                .report_outcome(task.id, outcome.code, &outcome.response)
                .await
            {
                Ok(()) => break,
                Err(err) => {
                    error!(
                        worker = self.index,
                        task_id = task.id,
                        "error update task status: {err}"
                    );
                }
            }
        }
    }
}
