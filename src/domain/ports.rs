//! Domain Ports - boundary between record reconstruction and the CLI tool
//!
//! The reconstructors only ever see decoded property triples. Where the raw
//! report bytes come from is behind [`ReportSource`].

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Report Kinds
// =============================================================================

/// The three reports the inventory is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Volumes,
    Disks,
    Adapters,
}

impl ReportKind {
    /// naviseccli sub-command arguments producing this report
    pub fn command_args(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Volumes => &["lun", "-list"],
            ReportKind::Disks => &["getdisk", "-all"],
            ReportKind::Adapters => &["port", "-list", "-hba"],
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Volumes => write!(f, "volumes"),
            ReportKind::Disks => write!(f, "disks"),
            ReportKind::Adapters => write!(f, "adapters"),
        }
    }
}

// =============================================================================
// Report Source Port
// =============================================================================

/// Produces the raw XML bytes of one report for one array endpoint
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the raw report.
    ///
    /// Implementations surface their failures as invocation errors; an empty
    /// report is an error, never `Ok` with no bytes.
    async fn fetch(&self, endpoint: &str, kind: ReportKind) -> Result<Vec<u8>>;
}
