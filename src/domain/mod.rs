//! Domain layer - inventory records and port definitions
//!
//! Records are plain data handed to the caller; ports define the seam to the
//! external command-line tool.

pub mod ports;
pub mod records;

pub use ports::*;
pub use records::*;
