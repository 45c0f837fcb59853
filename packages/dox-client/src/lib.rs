//! Pure Document Information Extraction REST API client.
//!
//! A minimal client for the document extraction service. Supports uploading a
//! document as a new extraction job, polling the job, and deleting it once the
//! result has been collected. Authentication uses the OAuth2 client-credentials
//! grant; the token is fetched on first use and renewed once when it expires.
//!
//! # Example
//!
//! ```rust,ignore
//! use dox_client::{ClientConfig, DocumentType, DoxClient};
//!
//! let client = DoxClient::new(ClientConfig::from_env()?);
//!
//! let schema = DocumentType::Invoice.schema();
//! let job = client.submit("invoice.pdf", DocumentType::Invoice, schema.id).await?;
//! let result = client.fetch(&job.id).await?;
//! println!("{}", result.status);
//! ```
//!
//! See <https://help.sap.com/docs/document-information-extraction/document-information-extraction/api-reference>
//! for the service API.

pub mod auth;
pub mod credentials;
pub mod error;
pub mod schema;
pub mod simplify;
pub mod types;
pub mod url;

pub use credentials::{ClientConfig, ClientCredentials, SecretString};
pub use error::{DoxError, Result};
pub use schema::{map_type_to_schema, DocumentType, Schema};
pub use simplify::{simplify, SimplifiedExtraction, SimplifiedField, SimplifiedResult};
pub use types::{Job, JobStatus, UploadOptions};

use auth::AccessToken;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const JOBS_PATH: &str = "/document-information-extraction/v1/document/jobs";

/// Highest status accepted from the upload endpoint.
const SUBMIT_MAX_STATUS: u16 = 201;
/// Highest status accepted from the status and delete endpoints.
const FETCH_MAX_STATUS: u16 = 200;
const DELETE_MAX_STATUS: u16 = 200;

/// Whether a `401` may still be answered by renewing the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

/// Document extraction API client.
pub struct DoxClient {
    http_client: Client,
    base_url: String,
    token_url: String,
    credentials: ClientCredentials,
    token: RwLock<Option<AccessToken>>,
}

impl DoxClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http_client: Client::new(),
            token_url: url::join(&config.oauth_url, auth::TOKEN_PATH),
            base_url: config.base_url,
            credentials: config.credentials,
            token: RwLock::new(None),
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, ...).
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Fetch a fresh token and cache it for subsequent calls.
    pub(crate) async fn authenticate(&self) -> Result<AccessToken> {
        let token =
            auth::fetch_token(&self.http_client, &self.token_url, &self.credentials).await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Cached token, acquiring one first if none exists yet.
    async fn current_token(&self) -> Result<AccessToken> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref() {
                return Ok(token.clone());
            }
        }
        self.authenticate().await
    }

    /// Issue an authorized request.
    ///
    /// On an expired token the token is renewed and the request retried exactly
    /// once. A response above `max_status` becomes [`DoxError::Http`]; that
    /// includes a `401` on the retry.
    async fn call<F>(&self, build: F, max_status: u16) -> Result<Response>
    where
        F: Fn(&Client) -> Result<RequestBuilder>,
    {
        let token = self.current_token().await?;
        let response = match self.send(&build, &token, Attempt::First).await {
            Err(DoxError::TokenExpired) => {
                debug!("Access token expired, renewing");
                let token = self.authenticate().await?;
                self.send(&build, &token, Attempt::Retry).await?
            }
            other => other?,
        };
        check_status(response, max_status).await
    }

    async fn send<F>(&self, build: &F, token: &AccessToken, attempt: Attempt) -> Result<Response>
    where
        F: Fn(&Client) -> Result<RequestBuilder>,
    {
        if token.is_expired() {
            return Err(DoxError::TokenExpired);
        }

        let response = build(&self.http_client)?
            .bearer_auth(token.secret())
            .send()
            .await?;

        if attempt == Attempt::First && response.status() == StatusCode::UNAUTHORIZED {
            return Err(DoxError::TokenExpired);
        }
        Ok(response)
    }

    fn job_url(&self, document_id: &str) -> String {
        url::join(&self.base_url, &format!("{}/{}", JOBS_PATH, document_id))
    }

    /// Upload a document to start a new extraction job.
    ///
    /// The file is sent under its original name together with the
    /// `documentType`, `clientId` and `schemaId` options. Returns the new job
    /// (id, processedTime and status).
    pub async fn submit(
        &self,
        document_path: impl AsRef<Path>,
        document_type: DocumentType,
        schema_id: &str,
    ) -> Result<Job> {
        let path = document_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DoxError::Config(format!("not a file: {}", path.display())))?
            .to_string();

        let content = tokio::fs::read(path).await?;
        let options = serde_json::to_string(&UploadOptions::new(document_type.as_str(), schema_id))?;
        let url = url::join(&self.base_url, JOBS_PATH);

        info!(
            file = %file_name,
            bytes = content.len(),
            document_type = %document_type,
            "Uploading document"
        );

        let response = self
            .call(
                |http| {
                    let file = Part::bytes(content.clone())
                        .file_name(file_name.clone())
                        .mime_str("application/pdf")?;
                    let form = Form::new()
                        .part("file", file)
                        .text("options", options.clone());
                    Ok(http.post(&url).multipart(form))
                },
                SUBMIT_MAX_STATUS,
            )
            .await?;

        let job = parse_job(response).await?;
        info!(document_id = %job.id, status = %job.status, "Extraction job created");
        Ok(job)
    }

    /// Fetch the current state of a job, including the extraction once done.
    ///
    /// A job reported as `FAILED` is returned as [`DoxError::ExtractionFailed`].
    pub async fn fetch(&self, document_id: &str) -> Result<Job> {
        let url = self.job_url(document_id);
        let response = self
            .call(|http| Ok(http.get(&url)), FETCH_MAX_STATUS)
            .await?;

        let job = parse_job(response).await?;
        debug!(document_id, status = %job.status, "Fetched job status");

        if job.status == JobStatus::Failed {
            warn!(document_id, "Extraction failed");
            return Err(DoxError::ExtractionFailed {
                document_id: document_id.to_string(),
            });
        }
        Ok(job)
    }

    /// Remove a job and its document from the service.
    pub async fn delete(&self, document_id: &str) -> Result<()> {
        let url = self.job_url(document_id);
        self.call(|http| Ok(http.delete(&url)), DELETE_MAX_STATUS)
            .await?;

        info!(document_id, "Deleted extraction job");
        Ok(())
    }
}

async fn check_status(response: Response, max_status: u16) -> Result<Response> {
    let status = response.status();
    if status.as_u16() > max_status {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, error = %body, "Extraction service API error");
        return Err(DoxError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn parse_job(response: Response) -> Result<Job> {
    let body: Value = response
        .json()
        .await
        .map_err(|e| DoxError::Parse(e.to_string()))?;
    Job::try_from(body)
}
