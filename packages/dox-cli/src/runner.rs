//! Upload a document, wait for the extraction, print the result.
//!
//! The run moves through SUBMITTING → POLLING → {DONE, FAILED, TIMED_OUT}.
//! A job that is not done within `max_wait` polls is not an error: the
//! service may still finish it later, so the run reports a timeout instead.

use dox_client::{simplify, DocumentType, DoxClient, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// How the finished result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The complete response from the service
    Raw,
    /// Only id, file name, document type, languages and the core field keys
    Simplified,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub document_type: DocumentType,
    pub file: PathBuf,
    pub format: OutputFormat,
    /// Skip deleting the job once the result has been printed
    pub keep_doc: bool,
    /// Maximum number of status checks
    pub max_wait: u32,
    pub poll_interval: Duration,
}

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { document_id: String },
    TimedOut { document_id: String, max_wait: u32 },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Completed { .. } => 0,
            Outcome::TimedOut { .. } => 1,
        }
    }
}

/// Run one document through the extraction service, writing the result (or
/// the timeout notice) to `out`.
pub async fn run<W: Write>(client: &DoxClient, options: &RunOptions, out: &mut W) -> Result<Outcome> {
    let schema = options.document_type.schema();
    info!(
        file = %options.file.display(),
        document_type = %options.document_type,
        schema = schema.name,
        "Submitting document"
    );

    let job = client
        .submit(&options.file, options.document_type, schema.id)
        .await?;
    let document_id = job.id;

    for attempt in 1..=options.max_wait {
        let job = client.fetch(&document_id).await?;

        if job.status.is_done() {
            info!(document_id = %document_id, attempt, "Extraction finished");
            print_result(&job.payload, options.format, out)?;

            if options.keep_doc {
                info!(document_id = %document_id, "Keeping document in the service");
            } else {
                client.delete(&document_id).await?;
            }
            return Ok(Outcome::Completed { document_id });
        }

        debug!(
            document_id = %document_id,
            attempt,
            status = %job.status,
            "Extraction still in progress"
        );
        tokio::time::sleep(options.poll_interval).await;
    }

    info!(document_id = %document_id, max_wait = options.max_wait, "Gave up waiting for extraction");
    writeln!(
        out,
        "Document status not 'DONE' after {} status checks.",
        options.max_wait
    )?;
    writeln!(out, "This may not indicate an error. Please check again later.")?;

    Ok(Outcome::TimedOut {
        document_id,
        max_wait: options.max_wait,
    })
}

fn print_result<W: Write>(payload: &Value, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Raw => write_json(payload, out),
        OutputFormat::Simplified => write_json(&simplify(payload)?, out),
    }
}

/// Pretty-print with a four-space indent.
fn write_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    writeln!(out)?;
    Ok(())
}
