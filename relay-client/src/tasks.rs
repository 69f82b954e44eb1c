//! Task-related API endpoints
//!
//! Implements the three operations of the scheduling protocol:
//! - Fetching the next pending task (`/shedule/get`)
//! - Executing a task's method (`/{method}` with normalized parameters)
//! - Reporting the outcome (`/shedule/update`, JSON-quoted response)
//!
//! The `shedule` spelling is the wire contract of the API.

use async_trait::async_trait;
use relay_core::domain::envelope::{CODE_NO_TASK, CODE_OK, Envelope};
use relay_core::domain::task::{Task, TaskOutcome};
use relay_core::params::render_param;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{SchedulerApi, SchedulerClient};

#[async_trait]
impl SchedulerApi for SchedulerClient {
    async fn fetch_next(&self) -> Result<Option<Task>> {
        let url = format!("{}/shedule/get", self.base_url());

        let response = self.http().get(&url).send().await?;

        let status = response.status();
        if status.as_u16() > 300 {
            return Err(status_error(status));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body).map_err(ClientError::Decode)?;
        forward_debug_trace(&envelope);

        match envelope.code {
            CODE_OK => {
                let task: Task = envelope.decode_data().map_err(ClientError::Payload)?;
                Ok(Some(task))
            }
            CODE_NO_TASK => Ok(None),
            code => Err(ClientError::Api {
                code,
                message: envelope.error_message,
            }),
        }
    }

    async fn run_method(&self, task: &Task) -> Result<TaskOutcome> {
        let mut query = Vec::with_capacity(task.request.len());
        for (key, value) in &task.request {
            let rendered = render_param(value);
            debug!(
                task_id = task.id,
                "added parameter {}={} to request", key, rendered
            );
            query.push((key.clone(), rendered));
        }

        debug!(task_id = task.id, "exec method {}", task.method);
        let url = format!("{}/{}", self.base_url(), task.method);

        let response = self.http().get(&url).query(&query).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(status_error(status));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body).map_err(ClientError::Decode)?;
        forward_debug_trace(&envelope);

        if envelope.code != CODE_OK {
            return Err(ClientError::Api {
                code: envelope.code,
                message: envelope.error_message,
            });
        }

        match envelope.canonical_data() {
            Ok(text) => Ok(TaskOutcome::ok(text)),
            Err(_) => Err(ClientError::Reencode { raw: body }),
        }
    }

    async fn report_outcome(&self, task_id: i64, code: i64, response: &str) -> Result<()> {
        let url = format!("{}/shedule/update", self.base_url());

        // The response travels as a JSON-quoted string value.
        let quoted = serde_json::Value::String(response.to_owned()).to_string();

        let query = [
            ("id", task_id.to_string()),
            ("code", code.to_string()),
            ("response", quoted),
        ];

        let response = self.http().get(&url).query(&query).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(status_error(status));
        }

        Ok(())
    }
}

fn status_error(status: reqwest::StatusCode) -> ClientError {
    ClientError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Relays the envelope's server-side debug trace into the local log
fn forward_debug_trace(envelope: &Envelope) {
    for entry in &envelope.debug {
        debug!(
            api_level = entry.level,
            "api debug [{}] {}", entry.time, entry.msg
        );
    }
}
