//! Record Reconstruction Module
//!
//! Turns the flat, ordered property stream of a report back into nested
//! records. Record boundaries are only signaled by sentinel names, so each
//! report kind is one stateful pass:
//!
//! - a sentinel opens a new record and makes it current
//! - a triple matching the record's field table sets one field on the
//!   current record
//! - anything else is skipped
//!
//! Field tables are declarative `(name, type) -> setter` lists, one per
//! record kind. A field seen while no record is open is dropped and counted.

pub mod adapters;
pub mod coerce;
pub mod disks;
pub mod volumes;

use crate::domain::{Disk, Hba, Volume};
use crate::envelope::{validate, Property, ResponseEnvelope};
use crate::error::Result;
use tracing::debug;

// =============================================================================
// Field Tables
// =============================================================================

/// Writes one coerced raw value into a record
pub type Setter<R> = fn(&mut R, &str);

/// One entry of a record kind's field table
pub struct Field<R> {
    pub name: &'static str,
    pub type_tag: &'static str,
    pub set: Setter<R>,
}

impl<R> Field<R> {
    pub const fn new(name: &'static str, type_tag: &'static str, set: Setter<R>) -> Self {
        Self {
            name,
            type_tag,
            set,
        }
    }

    pub fn matches(&self, prop: &Property) -> bool {
        prop.is(self.name, self.type_tag)
    }
}

/// Find the table entry for a triple, if any
pub fn lookup<'t, R>(table: &'t [Field<R>], prop: &Property) -> Option<&'t Field<R>> {
    table.iter().find(|field| field.matches(prop))
}

// =============================================================================
// Reconstruction State
// =============================================================================

/// What happened to one triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Field set on the current record
    Set,
    /// Known field, but no record was open to receive it
    Orphaned,
    /// Not in the field table
    Unknown,
}

/// Explicit state of one reconstruction pass
#[derive(Debug)]
pub struct Reconstruction<R> {
    records: Vec<R>,
    current: Option<usize>,
    orphaned: usize,
}

impl<R> Default for Reconstruction<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            current: None,
            orphaned: 0,
        }
    }
}

impl<R> Reconstruction<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and make it current
    pub fn open(&mut self, record: R) -> &mut R {
        self.records.push(record);
        let idx = self.records.len() - 1;
        self.current = Some(idx);
        &mut self.records[idx]
    }

    pub fn current_mut(&mut self) -> Option<&mut R> {
        let idx = self.current?;
        self.records.get_mut(idx)
    }

    /// Apply a triple to the current record through `table`
    pub fn apply(&mut self, table: &[Field<R>], prop: &Property) -> Applied {
        let Some(field) = lookup(table, prop) else {
            return Applied::Unknown;
        };
        match self.current_mut() {
            Some(record) => {
                (field.set)(record, &prop.value);
                Applied::Set
            }
            None => {
                self.orphan(prop);
                Applied::Orphaned
            }
        }
    }

    /// Record that a known field arrived with nothing open to take it
    pub fn orphan(&mut self, prop: &Property) {
        debug!("Dropping field {:?} seen outside any record", prop.name);
        self.orphaned += 1;
    }

    pub fn orphaned(&self) -> usize {
        self.orphaned
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn finish(self) -> Vec<R> {
        self.records
    }
}

// =============================================================================
// Report Operations
// =============================================================================

/// Validate the envelope, then rebuild its LUN records
pub fn volumes_from_envelope(envelope: &ResponseEnvelope) -> Result<Vec<Volume>> {
    validate(&envelope.status)?;
    Ok(volumes::reconstruct(&envelope.properties))
}

/// Validate the envelope, then rebuild its disk records
pub fn disks_from_envelope(envelope: &ResponseEnvelope) -> Result<Vec<Disk>> {
    validate(&envelope.status)?;
    Ok(disks::reconstruct(&envelope.properties))
}

/// Validate the envelope, then rebuild its HBA records and port lists
pub fn adapters_from_envelope(envelope: &ResponseEnvelope) -> Result<Vec<Hba>> {
    validate(&envelope.status)?;
    Ok(adapters::reconstruct(&envelope.properties))
}
