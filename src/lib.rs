//! VNX Inventory - LUN, disk and HBA inventory from naviseccli reports
//!
//! naviseccli's `-xml` output is a generic CIM envelope: a status section
//! plus one flat, ordered list of `(name, type, value)` triples. Record
//! boundaries are only visible in the names (sentinel labels, indentation),
//! so each report is rebuilt into typed records by a single stateful pass.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────────────┐
//! │   naviseccli     │──▶│ Envelope decode  │──▶│   Envelope Validator     │
//! │ (ReportSource)   │   │   (quick-xml)    │   │  errorCode / success     │
//! └──────────────────┘   └──────────────────┘   └────────────┬─────────────┘
//!                                                            │ property stream
//!                                   ┌────────────────────────┴─────────────┐
//!                                   │       Record Reconstructors          │
//!                                   │  volumes │ disks │ adapters + ports  │
//!                                   │        (tolerant value coercion)     │
//!                                   └──────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Inventory records and the report source port
//! - [`envelope`]: XML envelope decoding and status validation
//! - [`reconstruct`]: Record reconstruction and value coercion
//! - [`report`]: Decode + validate + reconstruct in one call
//! - [`navisec`]: naviseccli configuration, runner and client
//! - [`error`]: Error types and handling

pub mod domain;
pub mod envelope;
pub mod error;
pub mod navisec;
pub mod reconstruct;
pub mod report;

// Re-export commonly used types
pub use domain::{
    ArrayInventory, Disk, DiskLocation, Hba, HbaPort, ReportKind, ReportSource, Volume,
};

pub use envelope::{decode_envelope, EnvelopeStatus, Property, ResponseEnvelope};

pub use error::{Error, ErrorKind, Result};

pub use navisec::{Credentials, InventoryClient, NaviSecCli, NaviSecConfig};

pub use report::{parse_adapters, parse_disks, parse_report, parse_volumes, Records};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
