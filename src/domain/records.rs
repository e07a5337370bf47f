//! Domain Records - typed inventory reconstructed from navisec reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Volumes
// =============================================================================

/// A logical unit (LUN) as reported by `lun -list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// LUN number
    pub id: i64,
    /// LUN name
    pub name: String,
    /// UID, unique within one array
    pub uid: String,
    pub user_capacity_blocks: u64,
    pub user_capacity_gb: f64,
    pub consumed_capacity_blocks: u64,
    pub consumed_capacity_gb: f64,
    /// Backing pool, empty for RAID-group LUNs
    pub pool_name: String,
    pub raid_type: String,
    pub is_pool_lun: bool,
    pub is_thin_lun: bool,
    pub is_private: bool,
    pub is_compressed: bool,
}

// =============================================================================
// Disks
// =============================================================================

/// Physical position of a disk in the array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiskLocation {
    pub bus: u32,
    pub enclosure: u32,
    pub slot: u32,
}

impl fmt::Display for DiskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bus {} Enclosure {} Disk {}",
            self.bus, self.enclosure, self.slot
        )
    }
}

/// A physical disk as reported by `getdisk -all`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub location: DiskLocation,
    pub vendor_id: String,
    pub product_id: String,
    pub product_revision: String,
    pub serial_number: String,
    /// Capacity in MB
    pub capacity: i64,
    pub actual_capacity: i64,
    pub lba_of_user_space: i64,
    pub clariion_part_number: String,
    pub clariion_tla_part_number: String,
    /// Drive type label, kept exactly as reported
    pub drive_type: String,
    pub raid_group_id: String,
}

// =============================================================================
// Host Bus Adapters
// =============================================================================

/// One storage-processor port an HBA is connected to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HbaPort {
    /// Storage processor name (SP A / SP B)
    pub sp_name: String,
    pub sp_port_id: u64,
    pub hba_device_name: String,
    pub trusted: bool,
    pub logged_in: bool,
    pub defined: bool,
    pub source_id: u64,
    pub initiator_type: i32,
    pub storage_group_name: String,
}

/// A host bus adapter registered on the array, with its port list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hba {
    /// WWN-style unique id
    pub uid: String,
    pub server_name: String,
    pub server_ip_address: String,
    pub model_description: String,
    pub vendor_description: String,
    pub device_driver_name: String,
    pub ports: Vec<HbaPort>,
}

// =============================================================================
// Aggregate
// =============================================================================

/// Full inventory of one array endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayInventory {
    pub endpoint: String,
    pub collected_at: DateTime<Utc>,
    pub volumes: Vec<Volume>,
    pub disks: Vec<Disk>,
    pub hbas: Vec<Hba>,
}
