//! Report Operations
//!
//! Raw XML in, records out: decode the envelope, validate its status, and
//! reconstruct. Each call either returns every record of the report or one
//! terminal error; there is no partial result.

use crate::domain::{Disk, Hba, ReportKind, Volume};
use crate::envelope::decode_envelope;
use crate::error::Result;
use crate::reconstruct::{adapters_from_envelope, disks_from_envelope, volumes_from_envelope};
use serde::Serialize;

/// Records of any one report kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Records {
    Volumes(Vec<Volume>),
    Disks(Vec<Disk>),
    Adapters(Vec<Hba>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::Volumes(v) => v.len(),
            Records::Disks(d) => d.len(),
            Records::Adapters(h) => h.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a `lun -list` XML report
pub fn parse_volumes(xml: &[u8]) -> Result<Vec<Volume>> {
    volumes_from_envelope(&decode_envelope(xml)?)
}

/// Parse a `getdisk -all` XML report
pub fn parse_disks(xml: &[u8]) -> Result<Vec<Disk>> {
    disks_from_envelope(&decode_envelope(xml)?)
}

/// Parse a `port -list -hba` XML report
pub fn parse_adapters(xml: &[u8]) -> Result<Vec<Hba>> {
    adapters_from_envelope(&decode_envelope(xml)?)
}

/// Parse an XML report of the given kind
pub fn parse_report(kind: ReportKind, xml: &[u8]) -> Result<Records> {
    Ok(match kind {
        ReportKind::Volumes => Records::Volumes(parse_volumes(xml)?),
        ReportKind::Disks => Records::Disks(parse_disks(xml)?),
        ReportKind::Adapters => Records::Adapters(parse_adapters(xml)?),
    })
}
