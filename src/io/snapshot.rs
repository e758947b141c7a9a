//! Table snapshots
//!
//! A snapshot is a whole table written to a fixed file name derived from the
//! table and the format (`clients.json`, `atms.xml`, ...). Each table has its
//! own typed container, so export and import are generic over [`Snapshot`]
//! rather than switching on record types at runtime.
//!
//! Import inserts every record with the identifier it had in the snapshot,
//! inside a single transaction: a failing record leaves the table as it was.

use super::format::{decode, encode, SnapshotFormat};
use super::xml::{XmlAtms, XmlClients};
use crate::store::RecordStore;
use crate::types::{Atm, Client, LedgerError};
use clap::ValueEnum;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Named container wrapping every record of one table
pub trait Snapshot: Serialize + DeserializeOwned {
    type Record: Serialize + DeserializeOwned;

    /// Container as written to an XML snapshot
    type Xml: Serialize + DeserializeOwned;

    /// File name without extension
    const FILE_STEM: &'static str;

    fn from_records(records: Vec<Self::Record>) -> Self;

    fn records(&self) -> &[Self::Record];

    fn to_xml(&self) -> Self::Xml;

    fn from_xml(xml: Self::Xml) -> Self;

    /// Fixed snapshot location for this table in `dir`
    fn path(dir: &Path, format: SnapshotFormat) -> PathBuf {
        dir.join(format!("{}.{}", Self::FILE_STEM, format.extension()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "ClientsExport")]
pub struct ClientsExport {
    #[serde(rename = "Clients", default)]
    pub clients: Vec<Client>,
}

impl Snapshot for ClientsExport {
    type Record = Client;
    type Xml = XmlClients;
    const FILE_STEM: &'static str = "clients";

    fn from_records(clients: Vec<Client>) -> Self {
        Self { clients }
    }

    fn records(&self) -> &[Client] {
        &self.clients
    }

    fn to_xml(&self) -> XmlClients {
        XmlClients {
            clients: self.clients.iter().cloned().map(Into::into).collect(),
        }
    }

    fn from_xml(xml: XmlClients) -> Self {
        Self::from_records(xml.clients.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "AtmsExport")]
pub struct AtmsExport {
    #[serde(rename = "Atms", default)]
    pub atms: Vec<Atm>,
}

impl Snapshot for AtmsExport {
    type Record = Atm;
    type Xml = XmlAtms;
    const FILE_STEM: &'static str = "atms";

    fn from_records(atms: Vec<Atm>) -> Self {
        Self { atms }
    }

    fn records(&self) -> &[Atm] {
        &self.atms
    }

    fn to_xml(&self) -> XmlAtms {
        XmlAtms {
            atms: self.atms.iter().cloned().map(Into::into).collect(),
        }
    }

    fn from_xml(xml: XmlAtms) -> Self {
        Self::from_records(xml.atms.into_iter().map(Into::into).collect())
    }
}

/// Tables that can be exported and imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotTable {
    Clients,
    Atms,
}

/// Serialize `snapshot` and write it to its fixed file in `dir`
pub async fn write_snapshot<S: Snapshot>(
    dir: &Path,
    format: SnapshotFormat,
    snapshot: &S,
) -> Result<PathBuf, LedgerError> {
    let path = S::path(dir, format);
    let bytes = encode(snapshot, format)?;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(LedgerError::io(&path))?;
    Ok(path)
}

/// Read and deserialize the fixed snapshot file for `S` in `dir`
pub async fn read_snapshot<S: Snapshot>(
    dir: &Path,
    format: SnapshotFormat,
) -> Result<S, LedgerError> {
    let path = S::path(dir, format);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(LedgerError::io(&path))?;
    decode(&bytes, format)
}

/// Export/import of whole tables to a snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotService {
    records: RecordStore,
    dir: PathBuf,
}

impl SnapshotService {
    pub fn new(records: RecordStore, dir: impl Into<PathBuf>) -> Self {
        Self {
            records,
            dir: dir.into(),
        }
    }

    /// Export a table, returning the written file
    pub async fn export(
        &self,
        table: SnapshotTable,
        format: SnapshotFormat,
    ) -> Result<PathBuf, LedgerError> {
        match table {
            SnapshotTable::Clients => self.export_clients(format).await,
            SnapshotTable::Atms => self.export_atms(format).await,
        }
    }

    /// Import a table, returning the number of inserted records
    pub async fn import(
        &self,
        table: SnapshotTable,
        format: SnapshotFormat,
    ) -> Result<usize, LedgerError> {
        match table {
            SnapshotTable::Clients => self.import_clients(format).await,
            SnapshotTable::Atms => self.import_atms(format).await,
        }
    }

    pub async fn export_clients(&self, format: SnapshotFormat) -> Result<PathBuf, LedgerError> {
        let clients = self.records.list_clients().await?;

        let count = clients.len();
        let path = write_snapshot(&self.dir, format, &ClientsExport::from_records(clients)).await?;
        info!("exported {} clients to {}", count, path.display());
        Ok(path)
    }

    pub async fn export_atms(&self, format: SnapshotFormat) -> Result<PathBuf, LedgerError> {
        let atms = self.records.list_atms().await?;

        let count = atms.len();
        let path = write_snapshot(&self.dir, format, &AtmsExport::from_records(atms)).await?;
        info!("exported {} atms to {}", count, path.display());
        Ok(path)
    }

    pub async fn import_clients(&self, format: SnapshotFormat) -> Result<usize, LedgerError> {
        let snapshot: ClientsExport = read_snapshot(&self.dir, format).await?;
        self.records.restore_clients(snapshot.records()).await
    }

    pub async fn import_atms(&self, format: SnapshotFormat) -> Result<usize, LedgerError> {
        let snapshot: AtmsExport = read_snapshot(&self.dir, format).await?;
        self.records.restore_atms(snapshot.records()).await
    }
}
