//! Bulk download of schemas listed in a CSV manifest
//!
//! Every row is fetched in file order and written to
//! `{outdir}/{subject}/schema{ext}`. The first failure aborts the run;
//! rows after it are never requested.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::checksum::Checksum;
use crate::client::RegistryClient;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::manifest::{read_manifest, ManifestRow};

/// Validated inputs of the download workflow
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub host: String,
    pub file: PathBuf,
    pub outdir: PathBuf,
    /// Whole-request timeout, client default when `None`
    pub timeout: Option<Duration>,
}

/// One schema written to disk
#[derive(Debug, Clone)]
pub struct DownloadedSchema {
    pub subject: String,
    pub version: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub checksum: Checksum,
}

/// Outcome of a completed download run
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub schemas: Vec<DownloadedSchema>,
}

impl DownloadReport {
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.schemas.iter().map(|s| s.bytes).sum()
    }
}

impl DownloadOptions {
    /// Validate flag values. Touches neither the filesystem nor the network.
    pub fn new(host: impl Into<String>, file: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Result<Self> {
        let host = host.into();
        let file = file.into();
        if host.is_empty() {
            return Err(SyncError::MissingFlag("host"));
        }
        if file.as_os_str().is_empty() {
            return Err(SyncError::MissingFlag("file"));
        }
        Ok(Self {
            host,
            file,
            outdir: outdir.into(),
            timeout: None,
        })
    }

    /// Merge command-line values over configuration
    pub fn from_args(
        config: &SyncConfig,
        host: Option<String>,
        file: Option<PathBuf>,
        outdir: Option<PathBuf>,
    ) -> Result<Self> {
        let mut options = Self::new(
            host.or_else(|| config.registry.host.clone()).unwrap_or_default(),
            file.unwrap_or_else(|| config.download.file.clone()),
            outdir.unwrap_or_else(|| config.download.outdir.clone()),
        )?;
        options.timeout = config.registry.timeout();
        Ok(options)
    }
}

/// Run the download workflow with a client built from `options.host`
pub fn download(options: &DownloadOptions) -> Result<DownloadReport> {
    let client = RegistryClient::with_timeout(&options.host, options.timeout)?;
    download_with(&client, options)
}

/// Run the download workflow against an existing client
pub fn download_with(client: &RegistryClient, options: &DownloadOptions) -> Result<DownloadReport> {
    let rows = read_manifest(&options.file)?;
    info!(manifest = %options.file.display(), rows = rows.len(), "manifest loaded");

    ensure_dir(&options.outdir)?;

    let mut report = DownloadReport::default();
    for row in rows {
        let downloaded = download_row(client, &options.outdir, &row).map_err(|e| SyncError::Download {
            subject: row.subject.clone(),
            version: row.version.clone(),
            source: Box::new(e),
        })?;
        info!(
            subject = %downloaded.subject,
            version = %downloaded.version,
            path = %downloaded.path.display(),
            checksum = %downloaded.checksum,
            "schema downloaded"
        );
        report.schemas.push(downloaded);
    }

    info!(
        schemas = report.len(),
        bytes = report.total_bytes(),
        outdir = %options.outdir.display(),
        "download complete"
    );
    Ok(report)
}

fn download_row(client: &RegistryClient, outdir: &Path, row: &ManifestRow) -> Result<DownloadedSchema> {
    let data = client.fetch_schema(&row.subject, &row.version)?;

    let subject_dir = outdir.join(&row.subject);
    ensure_dir(&subject_dir)?;

    let path = subject_dir.join(row.filename());
    fs::write(&path, &data).map_err(|source| SyncError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(DownloadedSchema {
        subject: row.subject.clone(),
        version: row.version.clone(),
        path,
        bytes: data.len(),
        checksum: Checksum::from_bytes(&data),
    })
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    debug!(path = %path.display(), "creating directory");
    fs::create_dir_all(path).map_err(|source| SyncError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
