//! Property triples and the decoded response envelope

use serde::{Deserialize, Serialize};

/// Type tags observed in navisec reports
pub mod type_tag {
    pub const STRING: &str = "string";
    pub const UINT32: &str = "uint32";
    pub const UINT64: &str = "uint64";
    pub const BOOLEAN: &str = "boolean";
}

/// One labeled `(name, type, value)` triple.
///
/// Names and values are kept byte-for-byte as reported: leading indentation
/// in a name carries nesting, trailing padding in a value is fixed-width
/// filler that individual fields may or may not strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: String,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        type_tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            value: value.into(),
        }
    }

    /// Exact name and type match
    pub fn is(&self, name: &str, type_tag: &str) -> bool {
        self.name == name && self.type_tag == type_tag
    }

    /// Name contains nothing but whitespace (report padding)
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// A decoded report: status section plus the ordered property stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Status properties (`errorCode`, `success`, ...), unordered
    pub status: Vec<Property>,
    /// Data section; order is the only record-boundary signal
    pub properties: Vec<Property>,
}

impl ResponseEnvelope {
    pub fn new(status: Vec<Property>, properties: Vec<Property>) -> Self {
        Self { status, properties }
    }
}
