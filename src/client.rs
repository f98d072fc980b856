//! Blocking client for the registry REST API
//!
//! Only the two calls the workflows need:
//!
//! - `GET  {host}/subjects/{subject}/versions/{version}/schema`
//! - `POST {host}/subjects/{subject}/versions`

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::schema::RegisterRequest;

/// Content type the registry expects on writes
pub const SCHEMA_REGISTRY_CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Thin wrapper over a blocking HTTP client bound to one registry host
pub struct RegistryClient {
    host: String,
    http: Client,
}

impl RegistryClient {
    /// Client with the HTTP library's default settings
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::with_timeout(host, None)
    }

    /// Client with an optional whole-request timeout
    pub fn with_timeout(host: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let host = host.into();
        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    /// Registry base URL without a trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn schema_url(&self, subject: &str, version: &str) -> String {
        format!("{}/subjects/{}/versions/{}/schema", self.host, subject, version)
    }

    pub fn versions_url(&self, subject: &str) -> String {
        format!("{}/subjects/{}/versions", self.host, subject)
    }

    /// Fetch the raw schema text of one subject version
    pub fn fetch_schema(&self, subject: &str, version: &str) -> Result<Vec<u8>> {
        let url = self.schema_url(subject, version);
        debug!(%url, "fetching schema");

        let response = self.http.get(&url).send().map_err(|source| SyncError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status, body: None });
        }

        let body = response
            .bytes()
            .map_err(|source| SyncError::Body { url, source })?;
        Ok(body.to_vec())
    }

    /// Register a schema under `subject`, returning the raw response body
    pub fn register_schema(&self, subject: &str, request: &RegisterRequest) -> Result<String> {
        let url = self.versions_url(subject);
        debug!(%url, bytes = request.schema.len(), "registering schema");

        // set before .json() so the vendor type is kept over application/json
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, SCHEMA_REGISTRY_CONTENT_TYPE)
            .json(request)
            .send()
            .map_err(|source| SyncError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| SyncError::Body { url, source })?;

        if !status.is_success() {
            return Err(SyncError::Status {
                status,
                body: Some(body),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = RegistryClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.host(), "http://localhost:8081");
        assert_eq!(
            client.schema_url("orders-value", "4"),
            "http://localhost:8081/subjects/orders-value/versions/4/schema"
        );
        assert_eq!(
            client.versions_url("orders-value"),
            "http://localhost:8081/subjects/orders-value/versions"
        );
    }

    #[test]
    fn test_fetch_rejects_non_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/subjects/missing/versions/1/schema")
            .with_status(404)
            .with_body("{\"error_code\":40401}")
            .create();

        let client = RegistryClient::new(server.url()).unwrap();
        let err = client.fetch_schema("missing", "1").unwrap_err();
        assert!(matches!(err, SyncError::Status { status, .. } if status.as_u16() == 404));
        mock.assert();
    }

    #[test]
    fn test_register_error_carries_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/subjects/orders-value/versions")
            .match_header("content-type", SCHEMA_REGISTRY_CONTENT_TYPE)
            .with_status(422)
            .with_body("{\"error_code\":42201,\"message\":\"Invalid schema\"}")
            .create();

        let client = RegistryClient::new(server.url()).unwrap();
        let err = client
            .register_schema("orders-value", &RegisterRequest::new("not a schema"))
            .unwrap_err();
        match err {
            SyncError::Status { status, body } => {
                assert_eq!(status.as_u16(), 422);
                assert!(body.unwrap().contains("Invalid schema"));
            }
            other => panic!("Expected Status, got {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_unreachable_host() {
        // port 9 (discard) on loopback is not expected to accept HTTP
        let client = RegistryClient::with_timeout("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = client.fetch_schema("orders-value", "1").unwrap_err();
        assert!(matches!(err, SyncError::Request { .. }));
        assert!(err.is_remote());
    }
}
