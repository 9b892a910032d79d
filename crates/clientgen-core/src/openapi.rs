//! OpenAPI document loading.
//!
//! This module fetches or reads an OpenAPI document and parses it into a raw JSON
//! value. It knows nothing about the document's structure beyond a couple of
//! convenience accessors; see [`crate::document`] for the typed view.
//!
//! # Examples
//!
//! ```no_run
//! use clientgen_core::openapi::OpenApiContext;
//! use clientgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Load an OpenAPI document from a file or an http(s) URL
//! let spec = OpenApiContext::from_file_or_url("openapi.yaml").await?;
//!
//! if let Some(title) = spec.title() {
//!     println!("API Title: {}", title);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// A loaded, not yet interpreted OpenAPI document
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the document, keys in document order
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Load from an http(s) URL or, for anything else, a file path
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();
        match remote_url(location) {
            Some(url) => Self::from_url(url).await,
            None => Self::from_file(location).await,
        }
    }

    /// Load from a file (JSON or YAML)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::from_str(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fetch from a URL (JSON or YAML)
    pub async fn from_url(url: Url) -> crate::Result<Self> {
        let response = reqwest::get(url.clone()).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI document from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI document from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::openapi(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::from_str(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI document from {}: {}",
                url, e
            ))
        })
    }

    /// Parse content as JSON, falling back to YAML
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> crate::Result<Self> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        match serde_yaml::from_str::<JsonValue>(content) {
            Ok(json) if json.is_object() => Ok(Self { json }),
            Ok(_) => Err(Error::openapi("content is not a JSON or YAML mapping")),
            Err(e) => Err(Error::openapi(format!(
                "content is neither valid JSON nor YAML: {}",
                e
            ))),
        }
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }
}

/// The location as a URL when it names an http(s) resource
pub fn remote_url(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
