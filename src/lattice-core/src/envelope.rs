use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::wire;

/// ResponseEnvelope is the uniform wrapper around every non-HEAD response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseEnvelope {
    #[serde(deserialize_with = "wire::boolean")]
    pub success: bool,
    #[serde(deserialize_with = "wire::uint")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub error_message: Option<String>,
    /// Operation-specific payload
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::json")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "HashMap::is_empty", deserialize_with = "wire::string_map")]
    pub headers: HashMap<String, String>,
    #[serde(deserialize_with = "wire::float")]
    pub processing_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub timestamp_utc: Option<DateTime<Utc>>,
}

impl ResponseEnvelope {
    /// Build an envelope for a response that did not carry one (HEAD, empty
    /// or non-JSON bodies).
    pub fn from_status(
        success: bool,
        status_code: u16,
        headers: HashMap<String, String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            success,
            status_code,
            data,
            headers,
            ..Default::default()
        }
    }

    /// The payload of a successful response, if it carries any data.
    pub fn payload(&self) -> Option<&Value> {
        self.data
            .as_ref()
            .filter(|data| self.success && wire::has_data(data))
    }

    pub fn into_payload(self) -> Option<Value> {
        let success = self.success;
        self.data.filter(|data| success && wire::has_data(data))
    }

    /// Best available description of a failed response.
    pub fn failure_message(&self) -> String {
        match self.error_message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("request failed with status {}", self.status_code),
        }
    }
}
