//! API response envelope
//!
//! Every endpoint of the scheduling API answers with the same generic
//! wrapper. The `data` payload is kept as raw JSON and re-decoded per call
//! site, since its shape depends on which endpoint produced it.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

/// Envelope code for a successful response with a payload in `data`
pub const CODE_OK: i64 = 0;

/// Envelope code signalling an empty task queue
pub const CODE_NO_TASK: i64 = 204;

/// Generic response wrapper used by every API call
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: i64,
    /// Raw payload, deferred. Decode with [`Envelope::decode_data`].
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    #[serde(default, rename = "errorMessage")]
    pub error_message: String,
    /// Server-side debug trace attached to the response
    #[serde(default)]
    pub debug: Vec<DebugEntry>,
}

/// One entry of the server-side debug trace
#[derive(Debug, Clone, Deserialize)]
pub struct DebugEntry {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub level: i64,
}

impl Envelope {
    /// Decodes the raw `data` payload into a concrete type
    ///
    /// A missing `data` field decodes as JSON `null`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match &self.data {
            Some(raw) => serde_json::from_str(raw.get()),
            None => serde_json::from_str("null"),
        }
    }

    /// Re-encodes the raw `data` payload to its canonical text form
    ///
    /// String payloads yield their bare content; everything else is compact
    /// JSON. The reporter applies the JSON quoting when the text goes back
    /// on the wire, so quoting here would double it.
    pub fn canonical_data(&self) -> serde_json::Result<String> {
        let value: serde_json::Value = self.decode_data()?;
        match value {
            serde_json::Value::String(text) => Ok(text),
            other => serde_json::to_string(&other),
        }
    }
}
