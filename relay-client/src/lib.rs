//! Relay HTTP Client
//!
//! A typed HTTP client for the scheduling API.
//!
//! The API exposes three GET endpoints under one base URL: fetching the next
//! pending task, executing a named method with query parameters, and
//! reporting a task's final outcome. All three answer with the same generic
//! envelope, decoded here.
//!
//! # Example
//!
//! ```no_run
//! use relay_client::{SchedulerApi, SchedulerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), relay_client::ClientError> {
//!     let client = SchedulerClient::new("http://localhost:8080");
//!
//!     if let Some(task) = client.fetch_next().await? {
//!         println!("next task: {} ({})", task.id, task.method);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod tasks;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use relay_core::domain::task::{Task, TaskOutcome};
use reqwest::Client;

/// Operations the runner needs from the scheduling API
///
/// The HTTP implementation is [`SchedulerClient`]; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    /// Fetches the next pending task
    ///
    /// Returns `Ok(None)` when the queue is empty (envelope code 204).
    async fn fetch_next(&self) -> Result<Option<Task>>;

    /// Executes a task's method and normalizes the result
    ///
    /// # Arguments
    /// * `task` - The task naming the method and its request parameters
    async fn run_method(&self, task: &Task) -> Result<TaskOutcome>;

    /// Reports a task's final outcome
    ///
    /// # Arguments
    /// * `task_id` - The task the outcome belongs to
    /// * `code` - The outcome code
    /// * `response` - The response body, sent as a JSON-quoted string
    async fn report_outcome(&self, task_id: i64, code: i64, response: &str) -> Result<()>;
}

/// HTTP client for the scheduling API
#[derive(Debug, Clone)]
pub struct SchedulerClient {
    /// Base URL of the API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl SchedulerClient {
    /// Create a new client with a default HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the scheduling API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This is how the request timeout is configured:
    ///
    /// ```
    /// use relay_client::SchedulerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SchedulerClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}
