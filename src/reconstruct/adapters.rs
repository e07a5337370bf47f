//! HBA reconstruction from `port -list -hba`
//!
//! Two levels of nesting. `HBA UID` opens an adapter; inside it,
//! `    SP Name` (four-space indented) opens a port on that adapter. Port
//! fields carry the same indentation. Opening an adapter or reaching the
//! per-HBA port section header closes the current port.

use super::{coerce, lookup, Field, Reconstruction};
use crate::domain::{Hba, HbaPort};
use crate::envelope::{type_tag, Property};
use tracing::debug;

pub const HBA_SENTINEL: &str = "HBA UID";
pub const PORT_SECTION: &str = "Information about each port of this HBA";
pub const PORT_SENTINEL: &str = "    SP Name";

/// Truth token for port flags
const YES: &str = "YES";

pub static HBA_FIELDS: &[Field<Hba>] = &[
    Field::new("Server Name", type_tag::STRING, |h, raw| {
        h.server_name = coerce::text(raw)
    }),
    Field::new("Server IP Address", type_tag::STRING, |h, raw| {
        h.server_ip_address = coerce::text(raw)
    }),
    Field::new("HBA Model Description", type_tag::STRING, |h, raw| {
        h.model_description = coerce::text(raw)
    }),
    Field::new("HBA Vendor Description", type_tag::STRING, |h, raw| {
        h.vendor_description = coerce::text(raw)
    }),
    Field::new("HBA Device Driver Name", type_tag::STRING, |h, raw| {
        h.device_driver_name = coerce::text(raw)
    }),
];

pub static PORT_FIELDS: &[Field<HbaPort>] = &[
    Field::new("    SP Port ID", type_tag::UINT64, |p, raw| {
        p.sp_port_id = coerce::uint(raw)
    }),
    Field::new("    HBA Devicename", type_tag::STRING, |p, raw| {
        p.hba_device_name = coerce::text(raw)
    }),
    Field::new("    Trusted", type_tag::STRING, |p, raw| {
        p.trusted = coerce::flag(raw, YES)
    }),
    Field::new("    Logged In", type_tag::STRING, |p, raw| {
        p.logged_in = coerce::flag(raw, YES)
    }),
    Field::new("    Defined", type_tag::STRING, |p, raw| {
        p.defined = coerce::flag(raw, YES)
    }),
    Field::new("    Source ID", type_tag::STRING, |p, raw| {
        p.source_id = coerce::uint(raw)
    }),
    Field::new("    Initiator Type", type_tag::STRING, |p, raw| {
        p.initiator_type = coerce::code(raw)
    }),
    Field::new("    StorageGroup Name", type_tag::STRING, |p, raw| {
        p.storage_group_name = coerce::text(raw)
    }),
];

/// Adapter pass state: the adapter list plus the open port, if any
#[derive(Debug, Default)]
pub(crate) struct AdapterReconstruction {
    hbas: Reconstruction<Hba>,
    current_port: Option<usize>,
}

impl AdapterReconstruction {
    fn open_hba(&mut self, uid: String) {
        self.hbas.open(Hba {
            uid,
            ..Default::default()
        });
        self.current_port = None;
    }

    fn open_port(&mut self, prop: &Property) {
        let Some(hba) = self.hbas.current_mut() else {
            self.current_port = None;
            self.hbas.orphan(prop);
            return;
        };
        hba.ports.push(HbaPort {
            sp_name: coerce::text(&prop.value),
            ..Default::default()
        });
        self.current_port = Some(hba.ports.len() - 1);
    }

    fn current_port_mut(&mut self) -> Option<&mut HbaPort> {
        let idx = self.current_port?;
        self.hbas.current_mut()?.ports.get_mut(idx)
    }

    fn step(&mut self, prop: &Property) {
        if prop.is(HBA_SENTINEL, type_tag::STRING) {
            self.open_hba(coerce::text(&prop.value));
        } else if prop.is(PORT_SECTION, type_tag::STRING) {
            self.current_port = None;
        } else if prop.is(PORT_SENTINEL, type_tag::STRING) {
            self.open_port(prop);
        } else if let Some(field) = lookup(PORT_FIELDS, prop) {
            match self.current_port_mut() {
                Some(port) => (field.set)(port, &prop.value),
                None => self.hbas.orphan(prop),
            }
        } else {
            self.hbas.apply(HBA_FIELDS, prop);
        }
    }

    pub(crate) fn orphaned(&self) -> usize {
        self.hbas.orphaned()
    }

    pub(crate) fn finish(self) -> Vec<Hba> {
        self.hbas.finish()
    }
}

pub(crate) fn run(properties: &[Property]) -> AdapterReconstruction {
    let mut state = AdapterReconstruction::default();
    for prop in properties.iter().filter(|p| !p.is_blank()) {
        state.step(prop);
    }
    state
}

/// Rebuild HBA records, each with its port list, from a property stream
pub fn reconstruct(properties: &[Property]) -> Vec<Hba> {
    let state = run(properties);
    debug!(
        "Reconstructed {} HBAs ({} orphaned fields)",
        state.hbas.records().len(),
        state.orphaned()
    );
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, type_tag: &str, value: &str) -> Property {
        Property::new(name, type_tag, value)
    }

    fn port(sp: &str, id: &str, sg: &str) -> Vec<Property> {
        vec![
            p("    SP Name", "string", sp),
            p("    SP Port ID", "uint64", id),
            p("    HBA Devicename", "string", ""),
            p("    Trusted", "string", "NO"),
            p("    Logged In", "string", "YES"),
            p("    Source ID", "string", "1049856"),
            p("    Defined", "string", "YES"),
            p("    Initiator Type", "string", "3"),
            p("    StorageGroup Name", "string", sg),
        ]
    }

    fn hba(uid: &str, server: &str) -> Vec<Property> {
        vec![
            p("", "string", ""),
            p("HBA UID", "string", uid),
            p("Server Name", "string", server),
            p("Server IP Address", "string", "10.2.19.40 "),
            p("HBA Model Description", "string", ""),
            p("HBA Vendor Description", "string", ""),
            p("HBA Device Driver Name", "string", "   "),
            p("Information about each port of this HBA", "string", ""),
        ]
    }

    #[test]
    fn test_single_hba_with_ports() {
        let mut stream = hba("20:00:00:25:B5:0A:00:1F:20:00:00:25:B5:0A:00:0F", "esx01 ");
        stream.extend(port("SP A", "0", "ESX_Cluster"));
        stream.extend(port("SP B", "1", "ESX_Cluster  "));

        let hbas = reconstruct(&stream);
        assert_eq!(hbas.len(), 1);

        let hba = &hbas[0];
        assert_eq!(hba.uid, "20:00:00:25:B5:0A:00:1F:20:00:00:25:B5:0A:00:0F");
        assert_eq!(hba.server_name, "esx01");
        assert_eq!(hba.server_ip_address, "10.2.19.40");
        assert_eq!(hba.device_driver_name, "");
        assert_eq!(hba.ports.len(), 2);

        let a = &hba.ports[0];
        assert_eq!(a.sp_name, "SP A");
        assert_eq!(a.sp_port_id, 0);
        assert!(!a.trusted);
        assert!(a.logged_in);
        assert!(a.defined);
        assert_eq!(a.source_id, 1_049_856);
        assert_eq!(a.initiator_type, 3);
        assert_eq!(a.storage_group_name, "ESX_Cluster");

        assert_eq!(hba.ports[1].sp_name, "SP B");
        assert_eq!(hba.ports[1].sp_port_id, 1);
        assert_eq!(hba.ports[1].storage_group_name, "ESX_Cluster");
    }

    #[test]
    fn test_ports_belong_to_their_own_hba() {
        let mut stream = hba("uid-1", "host1");
        stream.extend(port("SP A", "0", "sg1"));
        stream.extend(port("SP B", "0", "sg1"));
        stream.extend(port("SP A", "1", "sg1"));
        stream.extend(hba("uid-2", "host2"));
        stream.extend(hba("uid-3", "host3"));
        stream.extend(port("SP B", "3", "sg3"));

        let hbas = reconstruct(&stream);
        let counts: Vec<usize> = hbas.iter().map(|h| h.ports.len()).collect();
        assert_eq!(counts, vec![3, 0, 1]);
        assert_eq!(hbas[2].ports[0].storage_group_name, "sg3");
        assert_eq!(hbas[1].server_name, "host2");
    }

    #[test]
    fn test_port_flags_require_exact_yes() {
        let mut stream = hba("uid", "host");
        stream.extend(vec![
            p("    SP Name", "string", "SP A"),
            p("    Trusted", "string", "Yes"),
            p("    Logged In", "string", "yes"),
            p("    Defined", "string", ""),
        ]);
        let port = &reconstruct(&stream)[0].ports[0];
        assert!(!port.trusted);
        assert!(!port.logged_in);
        assert!(!port.defined);
    }

    #[test]
    fn test_unindented_port_names_are_unknown() {
        let mut stream = hba("uid", "host");
        stream.push(p("SP Name", "string", "SP A"));
        stream.push(p("Trusted", "string", "YES"));

        let hbas = reconstruct(&stream);
        assert!(hbas[0].ports.is_empty());
    }

    #[test]
    fn test_port_field_after_section_reset_is_dropped() {
        let mut stream = hba("uid", "host");
        stream.extend(port("SP A", "0", "sg"));
        stream.push(p("Information about each port of this HBA", "string", ""));
        stream.push(p("    Trusted", "string", "YES"));

        let state = run(&stream);
        assert_eq!(state.orphaned(), 1);
        let hbas = state.finish();
        assert_eq!(hbas[0].ports.len(), 1);
        assert!(!hbas[0].ports[0].trusted);
    }

    #[test]
    fn test_second_port_section_appends() {
        let mut stream = hba("uid", "host");
        stream.extend(port("SP A", "0", "sg"));
        stream.push(p("Information about each port of this HBA", "string", ""));
        stream.extend(port("SP B", "4", "sg"));

        let hbas = reconstruct(&stream);
        assert_eq!(hbas[0].ports.len(), 2);
        assert_eq!(hbas[0].ports[0].sp_port_id, 0);
        assert_eq!(hbas[0].ports[1].sp_port_id, 4);
    }

    #[test]
    fn test_port_without_hba_is_dropped() {
        let mut stream = port("SP A", "0", "sg");
        stream.extend(hba("uid", "host"));

        let state = run(&stream);
        // the sentinel plus every port field
        assert_eq!(state.orphaned(), 9);
        let hbas = state.finish();
        assert_eq!(hbas.len(), 1);
        assert!(hbas[0].ports.is_empty());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let mut stream = hba("uid", "host");
        stream.extend(port("SP A", "0", "sg"));
        assert_eq!(reconstruct(&stream), reconstruct(&stream));
    }
}
