use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Prefix of every generated design identifier.
pub const DESIGN_ID_PREFIX: &str = "dsn_";

/// Caller-supplied design state. Only `title` is required; everything else is
/// carried through untouched.
#[derive(Debug, Clone)]
pub struct DesignSubmission {
    title: String,
    raw: Map<String, Value>,
}

impl DesignSubmission {
    /// Accepts a JSON object with a string `title`.
    pub fn from_json(body: Value) -> Option<Self> {
        let Value::Object(raw) = body else {
            return None;
        };
        let title = raw.get("title")?.as_str()?.to_string();

        Some(Self { title, raw })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.raw)
    }
}

/// Response for an accepted design. Nothing is stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSaveResult {
    pub message: String,
    pub design_id: String,
    pub data_received: Value,
}

impl DesignSaveResult {
    pub fn new(submission: DesignSubmission, received_at: DateTime<Utc>) -> Self {
        Self {
            message: "Design saved successfully!".to_string(),
            design_id: design_id(received_at),
            data_received: submission.into_value(),
        }
    }
}

/// `dsn_` followed by whole seconds since the Unix epoch.
pub fn design_id(at: DateTime<Utc>) -> String {
    format!("{}{}", DESIGN_ID_PREFIX, at.timestamp())
}
