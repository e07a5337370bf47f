//! Response Envelope Module
//!
//! Decodes naviseccli XML output into status properties and the ordered
//! property stream, and validates the status before the stream is trusted.

pub mod decode;
pub mod property;
pub mod status;

pub use decode::decode_envelope;
pub use property::{type_tag, Property, ResponseEnvelope};
pub use status::{validate, EnvelopeStatus};
