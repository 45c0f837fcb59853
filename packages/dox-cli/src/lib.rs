//! Command-line client for the Document Information Extraction service.
//!
//! `config` turns flags and `DOX_*` environment variables into a client
//! configuration and run options; `runner` drives one document from upload
//! to printed result.

pub mod config;
pub mod runner;

pub use config::Cli;
pub use runner::{run, Outcome, OutputFormat, RunOptions};
