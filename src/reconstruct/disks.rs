//! Disk reconstruction from `getdisk -all`
//!
//! Each disk opens with a triple named `Bus <b> Enclosure <e> Disk <s>`.
//! The location comes from that *name*; the triple's value is ignored.

use super::{coerce, Field, Reconstruction};
use crate::domain::{Disk, DiskLocation};
use crate::envelope::{type_tag, Property};
use tracing::debug;

pub static FIELDS: &[Field<Disk>] = &[
    Field::new("Vendor Id", type_tag::STRING, |d, raw| {
        d.vendor_id = coerce::text(raw)
    }),
    Field::new("Product Id", type_tag::STRING, |d, raw| {
        d.product_id = coerce::text(raw)
    }),
    Field::new("Product Revision", type_tag::STRING, |d, raw| {
        d.product_revision = coerce::text(raw)
    }),
    Field::new("Serial Number", type_tag::STRING, |d, raw| {
        d.serial_number = coerce::text(raw)
    }),
    Field::new("Capacity", type_tag::UINT64, |d, raw| {
        d.capacity = coerce::int(raw)
    }),
    Field::new("Actual Capacity", type_tag::STRING, |d, raw| {
        d.actual_capacity = coerce::int(raw)
    }),
    Field::new("LBA of User Space", type_tag::STRING, |d, raw| {
        d.lba_of_user_space = coerce::int(raw)
    }),
    Field::new("Clariion Part Number", type_tag::STRING, |d, raw| {
        d.clariion_part_number = coerce::text(raw)
    }),
    Field::new("Clariion TLA Part Number", type_tag::STRING, |d, raw| {
        d.clariion_tla_part_number = coerce::text(raw)
    }),
    Field::new("Drive Type", type_tag::STRING, |d, raw| {
        d.drive_type = coerce::verbatim(raw)
    }),
    Field::new("Raid Group ID", type_tag::STRING, |d, raw| {
        d.raid_group_id = coerce::text(raw)
    }),
];

/// Parse a `Bus <b> Enclosure <e> Disk <s>` sentinel name
pub fn parse_location(name: &str) -> Option<DiskLocation> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        ["Bus", bus, "Enclosure", enclosure, "Disk", slot] => Some(DiskLocation {
            bus: coerce::uint32(bus),
            enclosure: coerce::uint32(enclosure),
            slot: coerce::uint32(slot),
        }),
        _ => None,
    }
}

pub(crate) fn run(properties: &[Property]) -> Reconstruction<Disk> {
    let mut state = Reconstruction::new();
    for prop in properties {
        if prop.is_blank() {
            continue;
        }
        if prop.type_tag == type_tag::STRING {
            if let Some(location) = parse_location(&prop.name) {
                state.open(Disk {
                    location,
                    ..Default::default()
                });
                continue;
            }
        }
        state.apply(FIELDS, prop);
    }
    state
}

/// Rebuild disk records from a property stream
pub fn reconstruct(properties: &[Property]) -> Vec<Disk> {
    let state = run(properties);
    debug!(
        "Reconstructed {} disks ({} orphaned fields)",
        state.records().len(),
        state.orphaned()
    );
    state.finish()
}
