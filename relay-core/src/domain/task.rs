//! Task domain types

use serde::{Deserialize, Serialize};

/// A unit of remote work fetched from the scheduling API
///
/// A task names an API method to call and the parameters to call it with.
/// It is immutable once fetched and is consumed by exactly one worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub generator: i64,
    pub method: String,
    pub request: std::collections::HashMap<String, serde_json::Value>,
    /// Creation timestamp as reported by the API. Opaque, never parsed.
    pub created: String,
}

/// Final result of a task execution, reported back to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub code: i64,
    pub response: String,
}

impl TaskOutcome {
    /// Creates a successful outcome carrying the method's response body
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            code: 0,
            response: response.into(),
        }
    }
}
