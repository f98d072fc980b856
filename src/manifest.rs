//! CSV manifest of schemas to download
//!
//! ```text
//! subject,version,extension
//! orders-value,4,.avsc
//! payments-value,1,.proto
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Columns every record must carry, header included
pub const MANIFEST_FIELDS: usize = 3;

/// One schema to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub subject: String,
    pub version: String,
    /// File extension with its leading dot, e.g. `.avsc`
    pub extension: String,
}

impl ManifestRow {
    /// Output file name, `schema{ext}`
    pub fn filename(&self) -> String {
        format!("schema{}", self.extension)
    }
}

/// Read every data row of the manifest at `path`.
///
/// The whole file is parsed up front so a malformed record fails the run
/// before anything is fetched.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<ManifestRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SyncError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_manifest(file)?;
    rows.ok_or_else(|| SyncError::EmptyManifest(path.to_path_buf()))
}

/// Parse manifest records from a reader. `None` when there is no header row.
pub fn parse_manifest<R: Read>(reader: R) -> Result<Option<Vec<ManifestRow>>> {
    // the header goes through the same field-count check as the data rows
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != MANIFEST_FIELDS {
            return Err(SyncError::Manifest(csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "record {} has {} fields, expected {}",
                    records.len() + 1,
                    record.len(),
                    MANIFEST_FIELDS
                ),
            ))));
        }
        records.push(record);
    }

    let mut records = records.into_iter();
    if records.next().is_none() {
        return Ok(None);
    }

    Ok(Some(
        records
            .map(|r| ManifestRow {
                subject: r[0].to_string(),
                version: r[1].to_string(),
                extension: r[2].to_string(),
            })
            .collect(),
    ))
}
