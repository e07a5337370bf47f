//! Envelope Validator
//!
//! Gates the data section on the status properties of the response.

use super::property::{type_tag, Property};
use crate::error::{Error, Result};
use crate::reconstruct::coerce;
use tracing::debug;

const ERROR_CODE: &str = "errorCode";
const SUCCESS: &str = "success";

/// Status values extracted from the envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvelopeStatus {
    /// `errorCode`, if present and well formed
    pub error_code: Option<u64>,
    /// `success`, if present and well formed
    pub success: Option<bool>,
    /// `errorCode` was present but not a valid uint32
    malformed_code: bool,
}

impl EnvelopeStatus {
    /// Extract status by exact name+type match; later duplicates win
    pub fn from_properties(status: &[Property]) -> Self {
        let mut out = Self::default();
        for prop in status {
            if prop.is(ERROR_CODE, type_tag::UINT32) {
                match prop.value.trim().parse::<u32>() {
                    Ok(code) => {
                        out.error_code = Some(code as u64);
                        out.malformed_code = false;
                    }
                    Err(_) => {
                        out.error_code = None;
                        out.malformed_code = true;
                    }
                }
            } else if prop.is(SUCCESS, type_tag::BOOLEAN) {
                out.success = coerce::parse_bool_literal(&prop.value);
            }
        }
        out
    }

    /// Verdict: a zero (or absent) error code and an explicit `success=true`
    pub fn passed(&self) -> bool {
        !self.malformed_code && self.error_code.unwrap_or(0) == 0 && self.success == Some(true)
    }

    /// Turn the verdict into a `Protocol` error on failure
    pub fn check(&self) -> Result<()> {
        if self.passed() {
            return Ok(());
        }
        debug!(
            "Envelope rejected: errorCode={:?} success={:?}",
            self.error_code, self.success
        );
        Err(Error::Protocol {
            error_code: self.error_code,
            success: self.success,
        })
    }
}

/// Validate a status section
pub fn validate(status: &[Property]) -> Result<()> {
    EnvelopeStatus::from_properties(status).check()
}
