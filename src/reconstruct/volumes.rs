//! LUN reconstruction from `lun -list`

use super::{coerce, Field, Reconstruction};
use crate::domain::Volume;
use crate::envelope::{type_tag, Property};
use tracing::debug;

/// Opens a new LUN record; name may carry trailing padding
pub const SENTINEL: &str = "LOGICAL UNIT NUMBER";

/// Truth token for LUN flags
const YES: &str = "Yes";

pub static FIELDS: &[Field<Volume>] = &[
    Field::new("Name", type_tag::STRING, |v, raw| v.name = coerce::text(raw)),
    Field::new("UID", type_tag::STRING, |v, raw| v.uid = coerce::text(raw)),
    Field::new("User Capacity (Blocks)", type_tag::UINT64, |v, raw| {
        v.user_capacity_blocks = coerce::uint(raw)
    }),
    Field::new("User Capacity (GBs)", type_tag::STRING, |v, raw| {
        v.user_capacity_gb = coerce::float(raw)
    }),
    Field::new("Consumed Capacity (Blocks)", type_tag::UINT64, |v, raw| {
        v.consumed_capacity_blocks = coerce::uint(raw)
    }),
    Field::new("Consumed Capacity (GBs)", type_tag::STRING, |v, raw| {
        v.consumed_capacity_gb = coerce::float(raw)
    }),
    Field::new("Pool Name", type_tag::STRING, |v, raw| {
        v.pool_name = coerce::text(raw)
    }),
    Field::new("Raid Type", type_tag::STRING, |v, raw| {
        v.raid_type = coerce::text(raw)
    }),
    Field::new("Is Pool LUN", type_tag::STRING, |v, raw| {
        v.is_pool_lun = coerce::flag(raw, YES)
    }),
    Field::new("Is Thin LUN", type_tag::STRING, |v, raw| {
        v.is_thin_lun = coerce::flag(raw, YES)
    }),
    Field::new("Is Private", type_tag::STRING, |v, raw| {
        v.is_private = coerce::flag(raw, YES)
    }),
    Field::new("Is Compressed", type_tag::STRING, |v, raw| {
        v.is_compressed = coerce::flag(raw, YES)
    }),
];

fn is_sentinel(prop: &Property) -> bool {
    prop.type_tag == type_tag::UINT64 && prop.name.trim_end_matches(' ') == SENTINEL
}

pub(crate) fn run(properties: &[Property]) -> Reconstruction<Volume> {
    let mut state = Reconstruction::new();
    for prop in properties {
        if is_sentinel(prop) {
            state.open(Volume {
                id: coerce::int(&prop.value),
                ..Default::default()
            });
            continue;
        }
        state.apply(FIELDS, prop);
    }
    state
}

/// Rebuild LUN records from a property stream
pub fn reconstruct(properties: &[Property]) -> Vec<Volume> {
    let state = run(properties);
    debug!(
        "Reconstructed {} volumes ({} orphaned fields)",
        state.records().len(),
        state.orphaned()
    );
    state.finish()
}
