//! CLI support for odata-filter
//!
//! Provides programmatic access to the `odata-filter` subcommands for
//! embedding in other tools.

mod check;
mod compare;
mod docs;
mod encode;
mod read;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use compare::{CompareOptions, CompareResult, execute_compare};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use encode::{EncodeOptions, RewriteOptions, execute_encode, execute_rewrite};
pub use read::{ReadOptions, execute_read};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Filter text did not parse
    Parse(crate::ParseError),
    /// Filter could not be written back as text
    Encode(crate::EncodeError),
    /// Filter manager error
    Manager(crate::ManagerError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Encode(e) => write!(f, "Encode error: {}", e),
            CliError::Manager(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::UnknownCategory(c) => {
                write!(
                    f,
                    "Unknown category: '{}'\nRun 'odata-filter docs' to see available categories.",
                    c
                )
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Encode(e) => Some(e),
            CliError::Manager(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::EncodeError> for CliError {
    fn from(e: crate::EncodeError) -> Self {
        CliError::Encode(e)
    }
}

impl From<crate::ManagerError> for CliError {
    fn from(e: crate::ManagerError) -> Self {
        CliError::Manager(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
