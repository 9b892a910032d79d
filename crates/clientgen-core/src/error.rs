//! Error handling for the clientgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Only conditions that must stop a
//! generation run are represented here: a broken `$ref` or an oddly shaped schema
//! is rendered into the output as a permissive type and never becomes an `Error`.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::error::{Error, Result};
//!
//! fn load_tag(tag: &str) -> Result<&str> {
//!     if tag.is_empty() {
//!         return Err(Error::config("tag must not be empty"));
//!     }
//!     Ok(tag)
//! }
//!
//! assert!(load_tag("pets").is_ok());
//! ```

use thiserror::Error;

/// Result type for clientgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for clientgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// OpenAPI document error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two generated items would share a name and strict naming is enabled
    #[error("name collision in {scope}: '{name}' is generated more than once")]
    NameCollision {
        /// Where the collision happened (an artifact name or the output directory)
        scope: String,
        /// The colliding name
        name: String,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }
}
