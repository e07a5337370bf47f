//! Inventory Client
//!
//! Ties a [`ReportSource`] to the report parsers for one array endpoint.

use crate::domain::{ArrayInventory, Disk, Hba, ReportKind, ReportSource, Volume};
use crate::error::Result;
use crate::report::{parse_adapters, parse_disks, parse_report, parse_volumes, Records};
use chrono::Utc;
use tracing::{info, warn};

/// Fetches and parses inventory reports
pub struct InventoryClient<S> {
    source: S,
}

impl<S: ReportSource> InventoryClient<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch(&self, endpoint: &str, kind: ReportKind) -> Result<Vec<u8>> {
        self.source.fetch(endpoint, kind).await.map_err(|e| {
            warn!("Fetching {} from {} failed: {}", kind, endpoint, e);
            e
        })
    }

    /// LUNs of one array
    pub async fn volumes(&self, endpoint: &str) -> Result<Vec<Volume>> {
        let raw = self.fetch(endpoint, ReportKind::Volumes).await?;
        let volumes = parse_volumes(&raw)?;
        info!("{}: {} volumes", endpoint, volumes.len());
        Ok(volumes)
    }

    /// Physical disks of one array
    pub async fn disks(&self, endpoint: &str) -> Result<Vec<Disk>> {
        let raw = self.fetch(endpoint, ReportKind::Disks).await?;
        let disks = parse_disks(&raw)?;
        info!("{}: {} disks", endpoint, disks.len());
        Ok(disks)
    }

    /// Registered HBAs and their SP ports
    pub async fn adapters(&self, endpoint: &str) -> Result<Vec<Hba>> {
        let raw = self.fetch(endpoint, ReportKind::Adapters).await?;
        let hbas = parse_adapters(&raw)?;
        info!("{}: {} HBAs", endpoint, hbas.len());
        Ok(hbas)
    }

    /// One report by kind
    pub async fn report(&self, endpoint: &str, kind: ReportKind) -> Result<Records> {
        let raw = self.fetch(endpoint, kind).await?;
        parse_report(kind, &raw)
    }

    /// All three reports, fetched concurrently; any failure fails the whole
    pub async fn collect(&self, endpoint: &str) -> Result<ArrayInventory> {
        let (volumes, disks, hbas) = futures::try_join!(
            self.volumes(endpoint),
            self.disks(endpoint),
            self.adapters(endpoint)
        )?;

        Ok(ArrayInventory {
            endpoint: endpoint.to_string(),
            collected_at: Utc::now(),
            volumes,
            disks,
            hbas,
        })
    }
}
