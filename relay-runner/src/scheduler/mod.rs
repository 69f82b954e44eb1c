//! Scheduler layer for the runner
//!
//! This layer owns the bounded task channel, spawns the worker pool, and
//! runs the polling loop. Tasks flow poller → channel → worker; nothing
//! flows back, and nothing here ever terminates on its own.

mod poller;
mod worker;

pub use poller::Poller;
pub use worker::Worker;

use std::sync::Arc;

use relay_client::SchedulerApi;
use relay_core::domain::task::Task;
use tokio::sync::{Mutex, mpsc};
use tracing::info;

use crate::config::SchedulerConfig;

/// Top-level orchestrator: fixed worker pool fed by one poller
pub struct Scheduler {
    config: SchedulerConfig,
    client: Arc<dyn SchedulerApi>,
}

impl Scheduler {
    /// Creates a new scheduler
    pub fn new(config: SchedulerConfig, client: Arc<dyn SchedulerApi>) -> Self {
        Self { config, client }
    }

    /// Starts the worker pool, then runs the polling loop in the calling
    /// task
    ///
    /// There is no shutdown path; the loops run until the process is
    /// terminated.
    pub async fn run(self) {
        // Capacity equals the worker count: at most one fetched but
        // unprocessed task per worker. A full channel blocks the poller,
        // which is the backpressure against the API.
        let (queue_tx, queue_rx) = mpsc::channel::<Task>(self.config.worker_count);
        let queue_rx = Arc::new(Mutex::new(queue_rx));

        for index in 0..self.config.worker_count {
            info!("start runner #{index}");
            let worker = Worker::new(
                index,
                self.config.clone(),
                Arc::clone(&self.client),
                Arc::clone(&queue_rx),
            );
            tokio::spawn(worker.run());
        }

        info!("start checker");
        Poller::new(self.config, self.client, queue_tx).run().await;
    }
}
