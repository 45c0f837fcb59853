//! Command-line flags.
//!
//! Every flag can be omitted when the matching `DOX_*` environment variable is
//! set (a `.env` file in the working directory is loaded first). The
//! underscore spellings (`--oauth_client_id`, `--keep_doc`, ...) are accepted
//! as aliases.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use dox_client::{ClientConfig, ClientCredentials, DocumentType, SecretString};
use std::path::PathBuf;
use std::time::Duration;

use crate::runner::{OutputFormat, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "dox", version)]
#[command(about = "Extracts data from a pdf by using the Document Information Extraction service")]
#[command(max_term_width = 120)]
pub struct Cli {
    /// The id of the client used for authentication. Note: this is not the id
    /// of the client used for extraction.
    #[arg(long, alias = "oauth_client_id", env = "DOX_OAUTH_CLIENT_ID")]
    pub oauth_client_id: String,

    /// The secret for authentication.
    #[arg(
        long,
        alias = "oauth_client_secret",
        env = "DOX_OAUTH_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub oauth_client_secret: SecretString,

    /// URL to authenticate against.
    #[arg(long, alias = "oauth_url", env = "DOX_OAUTH_URL")]
    pub oauth_url: String,

    /// Base URL of the document extraction service.
    #[arg(long, alias = "base_url", env = "DOX_BASE_URL")]
    pub base_url: String,

    /// Document type of the provided file: invoice, paymentAdvice or
    /// purchaseOrder (case-insensitive). Custom document types are not
    /// supported. See also: https://help.sap.com/docs/document-information-extraction/document-information-extraction/supported-document-types-and-file-formats
    #[arg(
        long,
        alias = "document_type",
        env = "DOX_DOCUMENT_TYPE",
        value_parser = parse_document_type
    )]
    pub document_type: DocumentType,

    /// Print the full result or only the most relevant fields.
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        env = "DOX_FORMAT",
        default_value_t = OutputFormat::Raw
    )]
    pub format: OutputFormat,

    /// Keep the document in the service after it is finished.
    #[arg(
        long,
        alias = "keep_doc",
        env = "DOX_KEEP_DOC",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub keep_doc: bool,

    /// Maximum number of status checks, one per poll interval, before giving
    /// up on the document extraction service.
    #[arg(long, alias = "max_wait", env = "DOX_MAX_WAIT", default_value_t = 60)]
    pub max_wait: u32,

    /// Seconds between two status checks.
    #[arg(long, alias = "poll_interval", env = "DOX_POLL_INTERVAL", default_value_t = 1)]
    pub poll_interval: u64,

    /// Document to extract data from.
    #[arg(value_parser = existing_file)]
    pub file: PathBuf,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.base_url.clone(),
            self.oauth_url.clone(),
            ClientCredentials {
                client_id: self.oauth_client_id.clone(),
                client_secret: self.oauth_client_secret.clone(),
            },
        )
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            document_type: self.document_type,
            file: self.file.clone(),
            format: self.format,
            keep_doc: self.keep_doc,
            max_wait: self.max_wait,
            poll_interval: Duration::from_secs(self.poll_interval),
        }
    }
}

fn parse_document_type(s: &str) -> Result<DocumentType, String> {
    s.parse::<DocumentType>().map_err(|e| e.to_string())
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file '{}' does not exist", s))
    }
}
