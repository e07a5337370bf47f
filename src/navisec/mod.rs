//! naviseccli Module
//!
//! The external-tool side of the crate: how naviseccli is configured and
//! run, and a client that turns its reports into inventory.

pub mod client;
pub mod command;
pub mod config;

pub use client::*;
pub use command::*;
pub use config::*;
