//! I/O module
//!
//! Handles table snapshots on disk.
//!
//! # Components
//!
//! - `format` - Snapshot file formats (JSON, XML, CSV), pure encode/decode
//! - `snapshot` - Typed table containers and the export/import service
//! - `xml` - Attribute-only XML mirror of the snapshot records

pub mod format;
pub mod snapshot;
pub mod xml;

pub use format::SnapshotFormat;
pub use snapshot::{AtmsExport, ClientsExport, Snapshot, SnapshotService, SnapshotTable};
