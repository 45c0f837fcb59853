use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{DoxError, Result};

/// Options part sent alongside the uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOptions {
    pub document_type: String,
    pub client_id: String,
    pub schema_id: String,
}

impl UploadOptions {
    /// Extraction client used for every upload.
    pub const DEFAULT_CLIENT_ID: &'static str = "default";

    pub fn new(document_type: impl Into<String>, schema_id: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
            schema_id: schema_id.into(),
        }
    }
}

/// Job status as reported by the service.
///
/// Only `DONE` and `FAILED` are terminal; anything else is still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Done,
    Failed,
    Pending(String),
}

impl JobStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, JobStatus::Done)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "DONE" => JobStatus::Done,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Pending(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Done => f.write_str("DONE"),
            JobStatus::Failed => f.write_str("FAILED"),
            JobStatus::Pending(s) => f.write_str(s),
        }
    }
}

/// Fields every job response carries.
#[derive(Debug, Deserialize)]
struct JobHeader {
    id: String,
    status: String,
}

/// An extraction job.
///
/// `payload` is the complete response body, kept as returned so it can be
/// printed verbatim.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub payload: Value,
}

impl TryFrom<Value> for Job {
    type Error = DoxError;

    fn try_from(payload: Value) -> Result<Self> {
        let header = JobHeader::deserialize(&payload)
            .map_err(|e| DoxError::Parse(format!("unexpected job response: {}", e)))?;
        Ok(Job {
            id: header.id,
            status: JobStatus::from(header.status.as_str()),
            payload,
        })
    }
}

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}
