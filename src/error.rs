//! Error types for the VNX inventory extractor
//!
//! Every failure a report call can end with maps onto one of three terminal
//! kinds: the tool could not be invoked, its output could not be decoded, or
//! the decoded envelope reported failure. Per-field coercion problems are not
//! errors at all (see [`crate::reconstruct::coerce`]).

use std::time::Duration;
use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Invocation Errors
    // =========================================================================
    #[error("naviseccli invocation failed: {command} - {reason}")]
    Invocation { command: String, reason: String },

    #[error("naviseccli timed out: {command} after {after:?}")]
    Timeout { command: String, after: Duration },

    #[error("naviseccli produced no output: {command}")]
    EmptyOutput { command: String },

    // =========================================================================
    // Decode Errors
    // =========================================================================
    #[error("Envelope decode error: {0}")]
    Decode(String),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    #[error("naviseccli reported failure: errorCode={error_code:?} success={success:?}")]
    Protocol {
        error_code: Option<u64>,
        success: Option<bool>,
    },

    // =========================================================================
    // Local Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal error classification of a report call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tool could not be run, failed, or produced nothing
    Invocation,
    /// The output could not be decoded into property triples
    Decode,
    /// The envelope decoded but reported failure
    Protocol,
    /// Configuration or local I/O problem, not tied to a report
    Local,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Invocation { .. } | Error::Timeout { .. } | Error::EmptyOutput { .. } => {
                ErrorKind::Invocation
            }
            Error::Decode(_) | Error::Xml(_) => ErrorKind::Decode,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Configuration(_)
            | Error::JsonParse(_)
            | Error::YamlParse(_)
            | Error::Io(_) => ErrorKind::Local,
        }
    }

    /// Check if this error is transient.
    ///
    /// Arrays that are busy or briefly unreachable surface as invocation
    /// failures; the crate never retries, callers may.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Invocation { .. } | Error::Timeout { .. } | Error::EmptyOutput { .. }
        )
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
