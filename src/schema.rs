//! Schema types and request payloads

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Schema format as understood by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SchemaType {
    /// Protocol Buffers (`.proto`)
    #[serde(rename = "PROTOBUF")]
    Protobuf,
    /// JSON Schema (`.json`)
    #[serde(rename = "JSONSCHEMA")]
    JsonSchema,
    /// Apache Avro, the registry default
    #[serde(rename = "AVRO")]
    Avro,
}

impl SchemaType {
    /// Classify by file extension, with or without the leading dot.
    /// Anything unrecognized is Avro.
    pub fn from_extension(ext: &str) -> Self {
        match ext.strip_prefix('.').unwrap_or(ext) {
            "proto" => SchemaType::Protobuf,
            "json" => SchemaType::JsonSchema,
            _ => SchemaType::Avro,
        }
    }

    /// Classify a schema file by its path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(SchemaType::Avro)
    }

    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Protobuf => "PROTOBUF",
            SchemaType::JsonSchema => "JSONSCHEMA",
            SchemaType::Avro => "AVRO",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /subjects/{subject}/versions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Raw schema text, embedded verbatim
    pub schema: String,
    #[serde(rename = "schemaType", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
}

impl RegisterRequest {
    /// Body carrying only the schema text
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            schema_type: None,
        }
    }

    /// Body carrying the schema text and its declared type
    pub fn with_type(schema: impl Into<String>, schema_type: SchemaType) -> Self {
        Self {
            schema: schema.into(),
            schema_type: Some(schema_type),
        }
    }
}
