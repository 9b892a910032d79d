//! Configuration management for clientgen.
//!
//! `Config` says where the OpenAPI document comes from and where artifacts go.
//! `GenerateOptions` holds the settings that shape the generated text itself and is
//! the only configuration the pure transform sees. The configuration can be loaded
//! from a YAML, JSON or TOML file, or created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use clientgen_core::config::Config;
//!
//! // Create a new config programmatically
//! let mut config = Config::new("openapi.yaml", "src/api");
//! config.options.fallback_tag = "misc".to_string();
//! config.options.strict_names = true;
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for a clientgen run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path or http(s) URL of the OpenAPI document
    pub schema_path: String,

    /// Output directory for generated code
    pub output_dir: String,

    /// Optional directory with template overrides
    #[serde(default)]
    pub template_dir: Option<String>,

    /// Settings that shape the generated sources
    #[serde(flatten)]
    pub options: GenerateOptions,
}

/// Settings consumed by the transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// File stem of the shared types artifact
    pub types_module: String,

    /// File stem of the module exporting the request capability type
    pub request_module: String,

    /// Group that receives operations without tags
    pub fallback_tag: String,

    /// Extension of every generated artifact
    pub file_extension: String,

    /// Emit the type-only request contract artifact
    pub emit_request_contract: bool,

    /// Fail on name collisions instead of suffixing
    pub strict_names: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            types_module: "types".to_string(),
            request_module: "request".to_string(),
            fallback_tag: "default".to_string(),
            file_extension: "ts".to_string(),
            emit_request_contract: true,
            strict_names: false,
        }
    }
}

impl GenerateOptions {
    /// Artifact name for a file stem, e.g. `pets` -> `pets.ts`
    pub fn artifact_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.file_extension)
    }

    /// Reject settings that cannot produce a usable artifact set
    pub fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("types_module", &self.types_module),
            ("request_module", &self.request_module),
            ("fallback_tag", &self.fallback_tag),
            ("file_extension", &self.file_extension),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{field} must not be empty")));
            }
        }
        if self.types_module == self.request_module {
            return Err(Error::config(format!(
                "types_module and request_module are both '{}'",
                self.types_module
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a new Config with default options
    pub fn new(schema_path: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            schema_path: schema_path.into(),
            output_dir: output_dir.into(),
            template_dir: None,
            options: GenerateOptions::default(),
        }
    }

    /// Load configuration from a file; the format follows the extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = match ConfigFormat::of(path) {
            ConfigFormat::Toml => toml::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Save configuration to a file; the format follows the extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::of(path) {
            ConfigFormat::Toml => toml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        };
        fs::write(path, content).await?;
        Ok(())
    }
}

enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}
