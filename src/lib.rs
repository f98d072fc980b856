//! Schema Sync
//!
//! Moves schemas between local files and a Confluent-compatible schema
//! registry over its REST API.
//!
//! ## Features
//!
//! - **Bulk download**: fetch every subject version listed in a CSV manifest
//! - **Registration**: upload one schema file as a new version of a subject
//! - **Type inference**: `.proto` is PROTOBUF, `.json` is JSONSCHEMA, anything else AVRO
//! - **Layered configuration**: defaults, `schema-sync.toml`, `SCHEMA_SYNC__*` env vars
//!
//! ## Output layout
//!
//! ```text
//! api/
//! ├── orders-value/
//! │   └── schema.avsc
//! └── payments-value/
//!     └── schema.proto
//! ```

pub mod checksum;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod manifest;
pub mod register;
pub mod schema;

pub use checksum::Checksum;
pub use client::{RegistryClient, SCHEMA_REGISTRY_CONTENT_TYPE};
pub use config::SyncConfig;
pub use download::{download, download_with, DownloadOptions, DownloadReport, DownloadedSchema};
pub use error::{Result, SyncError};
pub use manifest::{read_manifest, ManifestRow};
pub use register::{register, register_with, RegisterOptions};
pub use schema::{RegisterRequest, SchemaType};
