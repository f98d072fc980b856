//! Registration of a single schema file as a new subject version

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::client::RegistryClient;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::schema::{RegisterRequest, SchemaType};

/// Validated inputs of the register workflow
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    pub host: String,
    pub subject: String,
    pub file: PathBuf,
    /// Label for diagnostics only. The registry assigns the real version.
    pub version: String,
    /// Send `schemaType` inferred from the file extension
    pub include_schema_type: bool,
    pub timeout: Option<Duration>,
}

impl RegisterOptions {
    /// Validate flag values. Touches neither the filesystem nor the network.
    pub fn new(
        host: impl Into<String>,
        subject: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Result<Self> {
        let host = host.into();
        let subject = subject.into();
        let file = file.into();
        if host.is_empty() {
            return Err(SyncError::MissingFlag("host"));
        }
        if file.as_os_str().is_empty() {
            return Err(SyncError::MissingFlag("file"));
        }
        if subject.is_empty() {
            return Err(SyncError::MissingFlag("subject"));
        }
        Ok(Self {
            host,
            subject,
            file,
            version: "1".to_string(),
            include_schema_type: true,
            timeout: None,
        })
    }

    /// Merge command-line values over configuration
    pub fn from_args(
        config: &SyncConfig,
        host: Option<String>,
        subject: Option<String>,
        file: Option<PathBuf>,
        version: Option<String>,
        no_schema_type: bool,
    ) -> Result<Self> {
        let mut options = Self::new(
            host.or_else(|| config.registry.host.clone()).unwrap_or_default(),
            subject.unwrap_or_default(),
            file.unwrap_or_default(),
        )?;
        options.version = version.unwrap_or_else(|| config.register.version.clone());
        options.include_schema_type = config.register.include_schema_type && !no_schema_type;
        options.timeout = config.registry.timeout();
        Ok(options)
    }

    /// Build the request body from the schema text
    pub fn request_for(&self, schema: String) -> RegisterRequest {
        if self.include_schema_type {
            RegisterRequest::with_type(schema, SchemaType::from_path(&self.file))
        } else {
            RegisterRequest::new(schema)
        }
    }
}

/// Run the register workflow with a client built from `options.host`
pub fn register(options: &RegisterOptions) -> Result<String> {
    let client = RegistryClient::with_timeout(&options.host, options.timeout)?;
    register_with(&client, options)
}

/// Run the register workflow against an existing client, returning the raw
/// registry response
pub fn register_with(client: &RegistryClient, options: &RegisterOptions) -> Result<String> {
    let data = fs::read(&options.file).map_err(|source| SyncError::Open {
        path: options.file.clone(),
        source,
    })?;
    // invalid UTF-8 sequences become U+FFFD rather than failing the upload
    let schema = String::from_utf8_lossy(&data).into_owned();

    let request = options.request_for(schema);
    info!(
        subject = %options.subject,
        version = %options.version,
        file = %options.file.display(),
        schema_type = request.schema_type.map(|t| t.as_str()).unwrap_or("-"),
        "registering schema"
    );

    let response = client
        .register_schema(&options.subject, &request)
        .map_err(|e| SyncError::Upload {
            subject: options.subject.clone(),
            version: options.version.clone(),
            source: Box::new(e),
        })?;

    info!(subject = %options.subject, "schema registered");
    Ok(response)
}
